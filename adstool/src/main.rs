mod application;
mod presentation;

use std::process::ExitCode;

fn main() -> ExitCode {
    match application::run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
