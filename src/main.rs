//! synthcheck - conformance harness for batch-mode audio rendering hosts
//!
//! Runs an external synth host through rendering scenarios and reports
//! whether its PCM output is structurally plausible.

use clap::Parser;
use synthcheck::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "synthcheck", about = "Conformance harness for batch-mode audio rendering hosts")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    match cli::dispatch(cli.command).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
