//! Binding Generator Binary

use tsxgen::{Cli, GeneratorError};
use std::process;

fn main() {
    let mut cli = Cli::new();

    match cli.run() {
        Ok(()) => {}
        Err(GeneratorError::Io(e)) => {
            eprintln!("IO Error: {}", e);
            process::exit(1);
        }
        Err(e) if e.is_model_error() => {
            eprintln!("Invalid component model: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            process::exit(1);
        }
    }
}
