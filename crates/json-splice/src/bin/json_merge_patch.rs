//! `json-merge-patch`: apply a JSON Merge Patch (RFC 7396) to a document.
//!
//! Usage:
//!   json-merge-patch '<patch-json>' < doc.json

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use json_splice::json_cli::{merge_patch, CliError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "json-merge-patch")]
#[command(version, about = "Apply a JSON Merge Patch to a document read from stdin")]
struct Cli {
    /// Merge patch document
    patch: String,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Pretty-print the result (disabled by --compact)
    #[arg(long, env = "JSON_SPLICE_PRETTY", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pretty: bool,
}

fn run(cli: Cli) -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    merge_patch(buf.trim(), &cli.patch, cli.pretty && !cli.compact)
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
