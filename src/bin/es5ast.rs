//! CLI entry point: reads an ECMAScript 5 source file and prints its
//! ESTree-shaped AST as JSON, following a `txxt-treeviz`-style clap-derive
//! CLI shape (positional input path, plain `--flag` options, `eprintln!` +
//! non-zero exit on failure rather than a panic).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;

use es5ast::api::{parse_to_json, OutputStyle};

/// Parse an ECMAScript 5 source file and print its AST as ESTree JSON.
#[derive(ClapParser, Debug)]
#[command(name = "es5ast", version, about)]
struct Cli {
    /// Path to the JavaScript source file to parse.
    input: PathBuf,

    /// Emit single-line JSON instead of 4-space indented JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("es5ast: couldn't read {}: {err}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let style = if cli.compact {
        OutputStyle::Compact
    } else {
        OutputStyle::Pretty
    };

    match parse_to_json(&source, style) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("es5ast: {err}");
            ExitCode::FAILURE
        }
    }
}
