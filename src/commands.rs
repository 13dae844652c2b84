//! CLI command definitions
//!
//! Defines the clap commands for the synthcheck harness.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run rendering scenarios against the target host
    Run {
        /// YAML scenario suite files; runs the built-in suite when omitted
        suites: Vec<PathBuf>,

        /// Path to the target executable (overrides env and config file)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Emit the report as JSON instead of the human-readable checklist
        #[arg(long)]
        json: bool,

        /// Show captured stderr and byte counts for every scenario
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the built-in scenarios
    List,

    /// Hex-dump the MIDI event fixture fed to the target
    Fixture,
}
