//! CLI command handling
//!
//! Resolves configuration, executes scenarios sequentially, and formats the
//! report. The process exit code is decided here: 0 when every scenario
//! passed, 1 otherwise (harness-level errors bubble up and exit 2).

use std::path::PathBuf;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::Result;
use crate::fixture;
use crate::scenario::{self, builtin_suite, report, RunSettings, Scenario, Suite};
use crate::target::ProcessTarget;

/// Dispatch a CLI command, returning the process exit code
pub async fn dispatch(command: Commands) -> Result<i32> {
    match command {
        Commands::Run {
            suites,
            target,
            json,
            verbose,
        } => run(suites, target, json, verbose).await,

        Commands::List => {
            println!("Built-in scenarios:");
            for scenario in builtin_suite() {
                let desc = scenario.description.as_deref().unwrap_or("");
                println!("  {:<20} {}", scenario.name, desc);
            }
            Ok(0)
        }

        Commands::Fixture => {
            let bytes = fixture::note_pair();
            for triple in bytes.chunks(3) {
                let hex: Vec<String> = triple.iter().map(|b| format!("{b:02X}")).collect();
                println!("{}", hex.join(" "));
            }
            Ok(0)
        }
    }
}

async fn run(
    suites: Vec<PathBuf>,
    target_flag: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<i32> {
    let config = Config::load()?;
    let target_path = config.resolve_target(target_flag.as_deref())?;
    let settings = RunSettings::from(&config);

    let scenarios = collect_scenarios(&suites)?;

    tracing::info!(
        target_path = %target_path.display(),
        scenarios = scenarios.len(),
        "starting harness run"
    );

    let target = ProcessTarget::new(target_path);
    let fixture = fixture::note_pair();

    // Sequential by design: one child process at a time, nothing shared
    // across scenarios but the read-only fixture.
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario_cfg in &scenarios {
        if !json {
            report::print_header(scenario_cfg, &scenario_cfg.args(), verbose);
        }

        let result =
            scenario::run_scenario(&target, scenario_cfg, &fixture, &settings).await;

        if !json {
            report::print_result(&result, verbose);
        }
        results.push(result);
    }

    let all_passed = if json {
        report::print_json(&results)?;
        results.iter().all(|r| r.passed())
    } else {
        report::print_summary(&results)
    };

    Ok(if all_passed { 0 } else { 1 })
}

/// Load the scenario list: YAML suites when given, the built-in set otherwise
fn collect_scenarios(suites: &[PathBuf]) -> Result<Vec<Scenario>> {
    if suites.is_empty() {
        return Ok(builtin_suite());
    }

    let mut scenarios = Vec::new();
    for path in suites {
        scenarios.extend(Suite::load(path)?.scenarios);
    }
    Ok(scenarios)
}
