//! NANDA SDK - provision hosts to run Internet of Agents servers

use std::process::ExitCode;

use clap::Parser;

use nanda_sdk::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
