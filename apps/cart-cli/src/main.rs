//! Cart pricing CLI entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    cart_cli::init_tracing();

    match cart_cli::run(std::env::args().skip(1)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Pricing failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
