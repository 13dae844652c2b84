//! Human-readable and JSON reporting for scenario results

use colored::Colorize;

use crate::common::Result;
use crate::scenario::{FailureKind, Scenario, ScenarioResult};

/// Print the header for a scenario about to run
pub fn print_header(scenario: &Scenario, target_args: &[String], verbose: bool) {
    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    if verbose {
        println!("  $ target {}", target_args.join(" ").dimmed());
    }
}

/// Print the checklist for a finished scenario
pub fn print_result(result: &ScenarioResult, verbose: bool) {
    match &result.failure {
        Some(kind @ FailureKind::LaunchFailed { .. })
        | Some(kind @ FailureKind::TimedOut { .. }) => {
            // Lifecycle failures: the payload checks never ran
            println!("  {} {}", "✗".red(), kind);
            return;
        }
        Some(kind @ FailureKind::ExitFailure { .. }) => {
            println!("  {} {}", "✗".red(), kind);
        }
        _ => {
            println!("  {} exit code 0", "✓".green());
        }
    }

    match &result.failure {
        Some(kind @ FailureKind::ZeroOutput)
        | Some(kind @ FailureKind::UndersizedOutput { .. }) => {
            println!("  {} {}", "✗".red(), kind);
        }
        _ => {
            println!(
                "  {} audio output: {} bytes (expected ~{}, minimum {})",
                "✓".green(),
                result.audio_bytes,
                result.expected_bytes,
                result.required_bytes
            );
        }
    }

    if result.batch_marker_seen {
        println!("  {} batch mode detected", "✓".green());
    } else {
        println!(
            "  {} batch mode marker not seen on stderr",
            "⚠".yellow()
        );
    }

    if verbose && !result.diagnostics.is_empty() {
        let excerpt: String = result.diagnostics.chars().take(200).collect();
        println!("  {} {}", "stderr:".dimmed(), excerpt.trim_end().dimmed());
    }
}

/// Print the run summary and the fixed completion banner
///
/// Returns true when every scenario passed.
pub fn print_summary(results: &[ScenarioResult]) -> bool {
    let passed = results.iter().filter(|r| r.passed()).count();
    let failed = results.len() - passed;

    println!();
    if failed == 0 {
        println!(
            "{} {}",
            "✓".green().bold(),
            format!("{passed} scenario(s) passed").green().bold()
        );
    } else {
        println!(
            "{} {}",
            "✗".red().bold(),
            format!("{failed} of {} scenario(s) failed", results.len())
                .red()
                .bold()
        );
        for result in results.iter().filter(|r| !r.passed()) {
            if let Some(kind) = &result.failure {
                println!("    {}: {}", result.name, kind);
            }
        }
    }

    println!("{}", "Harness run complete".dimmed());
    failed == 0
}

/// Emit the whole run as a JSON document
pub fn print_json(results: &[ScenarioResult]) -> Result<()> {
    let passed = results.iter().all(|r| r.passed());
    let report = serde_json::json!({
        "passed": passed,
        "scenarios": results,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
