//! `json-pointer`: look up a JSON Pointer (RFC 6901) in a document.
//!
//! Usage:
//!   json-pointer '<pointer>' < doc.json

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use json_splice::json_cli::{lookup_pointer, CliError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "json-pointer")]
#[command(version, about = "Print the value at a JSON Pointer in a document read from stdin")]
struct Cli {
    /// JSON Pointer, e.g. /foo/0/bar (empty for the whole document)
    #[arg(allow_hyphen_values = true)]
    pointer: String,

    /// Print the value on a single line
    #[arg(long)]
    compact: bool,

    /// Pretty-print the value (disabled by --compact)
    #[arg(long, env = "JSON_SPLICE_PRETTY", value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pretty: bool,
}

fn run(cli: Cli) -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    lookup_pointer(buf.trim(), &cli.pointer, cli.pretty && !cli.compact)
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
