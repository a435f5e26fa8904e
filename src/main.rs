//! Daily CLI - Local-first personal checklists

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = daily_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
