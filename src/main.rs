use clap::Parser;
use purchase_orders::cli::{self, Cli};
use purchase_orders::lifecycle::setup_tracing;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
