//! `json-diff`: print the JSON Patch that turns one document into another.
//!
//! Usage:
//!   json-diff source.json target.json

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use json_splice::json_cli::{diff_documents, CliError};
use json_splice::json_patch_diff::DiffOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "json-diff")]
#[command(version, about = "Print the JSON Patch between two JSON documents")]
struct Cli {
    /// Document the patch applies to
    source_file: PathBuf,

    /// Document the patch produces
    target_file: PathBuf,

    /// Only emit add, remove and replace operations
    #[arg(long)]
    raw: bool,

    /// Never turn insertions into copy operations
    #[arg(long)]
    no_copies: bool,

    /// Print the patch on a single line
    #[arg(long)]
    compact: bool,

    /// Pretty-print the patch (disabled by --compact)
    #[arg(long, env = "JSON_SPLICE_PRETTY", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pretty: bool,
}

fn run(cli: Cli) -> Result<String, CliError> {
    let src = std::fs::read_to_string(&cli.source_file)?;
    let dst = std::fs::read_to_string(&cli.target_file)?;
    let options = DiffOptions::default()
        .with_factorize(!cli.raw)
        .with_copy_from_unchanged(!cli.no_copies)
        .with_copy_from_earlier_adds(!cli.no_copies);
    diff_documents(&src, &dst, &options, cli.pretty && !cli.compact)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
