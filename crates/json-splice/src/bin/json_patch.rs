//! `json-patch`: apply a JSON Patch (RFC 6902) to a document.
//!
//! Usage:
//!   json-patch '<patch-array-json>' < doc.json
//!   json-patch --doc doc.json --patch-file patch.json

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use json_splice::json_cli::{apply_json_patch, CliError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "json-patch")]
#[command(version, about = "Apply a JSON Patch to a document read from stdin")]
struct Cli {
    /// Patch operations as a JSON array
    #[arg(required_unless_present = "patch_file", conflicts_with = "patch_file")]
    patch: Option<String>,

    /// Read the patch from a file instead of the first argument
    #[arg(long, value_name = "FILE")]
    patch_file: Option<PathBuf>,

    /// Read the document from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    doc: Option<PathBuf>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Pretty-print the result (disabled by --compact)
    #[arg(long, env = "JSON_SPLICE_PRETTY", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pretty: bool,
}

fn run(cli: Cli) -> Result<String, CliError> {
    let patch = match (cli.patch, cli.patch_file) {
        (Some(inline), _) => inline,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::from("[]"),
    };
    let doc = match cli.doc {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    apply_json_patch(doc.trim(), &patch, cli.pretty && !cli.compact)
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
