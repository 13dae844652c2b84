//! Scenario definition, execution, and reporting

pub mod config;
pub mod report;
pub mod runner;

pub use config::{builtin_suite, Param, Scenario, Suite};
pub use runner::{run_scenario, FailureKind, RunSettings, ScenarioResult};
