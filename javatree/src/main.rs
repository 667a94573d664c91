//! # javatree
//!
//! CLI front-end for `javatree_parser`: parses a Java source file and
//! prints the resulting AST as JSON. Exits 0 on success and 1 when the
//! file cannot be read or parsed.

mod cli;

use std::fs;
use std::process::ExitCode;

use cli::{Cli, OutputTarget};
use javatree_parser::parse_source;
use log::{debug, error};

fn main() -> ExitCode {
    let args = Cli::init();
    simple_logger::init_with_level(args.verbosity.into()).expect("logger init");

    let filename = args.file.display().to_string();
    let bytes = match fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("failed to read {}: {}", filename, err);
            return ExitCode::from(1);
        }
    };
    debug!(
        "read {} bytes from {}, parsing as {:?}",
        bytes.len(),
        filename,
        args.syntax
    );

    let unit = match parse_source(&bytes, &filename) {
        Ok(unit) => unit,
        Err(err) => {
            eprintln!("{}", err);
            let context = err.format_with_context();
            if !context.is_empty() {
                eprintln!("{}", context);
            }
            return ExitCode::from(1);
        }
    };

    let json = match serde_json::to_string_pretty(&unit) {
        Ok(json) => json,
        Err(err) => {
            error!("failed to serialize AST: {}", err);
            return ExitCode::from(1);
        }
    };

    match args.output_target() {
        OutputTarget::Stdout => println!("{}", json),
        OutputTarget::Null => debug!("parsed {} (output suppressed)", filename),
        OutputTarget::File(path) => {
            if let Err(err) = fs::write(&path, json + "\n") {
                error!("failed to write {}: {}", path.display(), err);
                return ExitCode::from(1);
            }
            println!("Converted {}", path.display());
        }
    }

    ExitCode::SUCCESS
}
