//! Till POS terminal entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match till_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("till: {err}");
            ExitCode::FAILURE
        }
    }
}
