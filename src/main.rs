//! platform-smoke - ordered smoke tests for the cloud platform API client
//!
//! Runs the authentication and user-lifecycle suites from the command line.

use clap::Parser;
use commands::Commands;
use platform_smoke::{cli, commands, common::logging};

#[derive(Parser)]
#[command(name = "platform-smoke", about = "Smoke-test the platform API client")]
#[command(version, long_about = None)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
