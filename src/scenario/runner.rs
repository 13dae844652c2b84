//! Scenario execution and outcome classification
//!
//! One scenario, one render, one result. Launch failures, timeouts, and
//! payload check failures are mutually exclusive terminal classifications;
//! none of them abort the rest of the run.

use std::time::Duration;

use serde::Serialize;

use crate::common::config::{AudioFormat, Config};
use crate::common::Error;
use crate::scenario::Scenario;
use crate::target::Renderable;

/// Per-run knobs the classification depends on
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub format: AudioFormat,
    pub batch_marker: String,
    /// Timeout applied to scenarios that don't carry their own
    pub default_timeout_secs: u64,
}

impl From<&Config> for RunSettings {
    fn from(config: &Config) -> Self {
        Self {
            format: config.audio,
            batch_marker: config.target.batch_marker.clone(),
            default_timeout_secs: config.timeouts.render_secs,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        (&Config::default()).into()
    }
}

/// Why a scenario failed
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// The target executable could not be spawned
    LaunchFailed { reason: String },
    /// The target was killed at the scenario deadline
    TimedOut { timeout_secs: u64 },
    /// The target exited with a non-zero code (None: killed by a signal)
    ExitFailure { exit_code: Option<i32> },
    /// The target exited cleanly but wrote no audio at all
    ZeroOutput,
    /// Output below 90% of the theoretical size for the requested duration
    UndersizedOutput { actual: u64, required: u64 },
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::LaunchFailed { reason } => write!(f, "launch failed: {reason}"),
            FailureKind::TimedOut { timeout_secs } => {
                write!(f, "timed out after {timeout_secs}s")
            }
            FailureKind::ExitFailure {
                exit_code: Some(code),
            } => write!(f, "target exited with code {code}"),
            FailureKind::ExitFailure { exit_code: None } => {
                write!(f, "target terminated by signal")
            }
            FailureKind::ZeroOutput => write!(f, "no audio output generated"),
            FailureKind::UndersizedOutput { actual, required } => {
                write!(f, "output undersized: {actual} bytes, need at least {required}")
            }
        }
    }
}

/// Everything observed while running one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    /// Theoretical output size for the scenario's duration
    pub expected_bytes: u64,
    /// Inclusive lower bound actually enforced (90% of expected)
    pub required_bytes: u64,
    /// Bytes captured from the target's stdout (0 for killed/unlaunched runs)
    pub audio_bytes: u64,
    pub exit_code: Option<i32>,
    /// Whether stderr contained the batch-mode marker. Absence is a soft
    /// warning only; some builds do not emit it.
    pub batch_marker_seen: bool,
    /// Captured stderr text
    pub diagnostics: String,
    pub failure: Option<FailureKind>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run one scenario against the target and classify the outcome
///
/// Never returns an error: every failure mode is folded into the result so
/// one broken scenario cannot take down the rest of the suite.
pub async fn run_scenario(
    target: &dyn Renderable,
    scenario: &Scenario,
    fixture: &[u8],
    settings: &RunSettings,
) -> ScenarioResult {
    let expected_bytes = settings.format.expected_bytes(scenario.duration_secs);
    let required_bytes = settings.format.required_bytes(scenario.duration_secs);

    let mut result = ScenarioResult {
        name: scenario.name.clone(),
        expected_bytes,
        required_bytes,
        audio_bytes: 0,
        exit_code: None,
        batch_marker_seen: false,
        diagnostics: String::new(),
        failure: None,
    };

    let timeout_secs = scenario.timeout_secs_or(settings.default_timeout_secs);
    let timeout = Duration::from_secs(timeout_secs);

    let output = match target.render(&scenario.args(), fixture, timeout).await {
        Ok(output) => output,
        Err(Error::Timeout(timeout_secs)) => {
            result.failure = Some(FailureKind::TimedOut { timeout_secs });
            return result;
        }
        Err(e) => {
            // Anything else that prevented a completed run counts as a
            // launch-level failure; the payload checks never ran.
            result.failure = Some(FailureKind::LaunchFailed {
                reason: e.to_string(),
            });
            return result;
        }
    };

    result.audio_bytes = output.audio.len() as u64;
    result.exit_code = output.exit_code;
    result.batch_marker_seen = output.diagnostics.contains(&settings.batch_marker);
    result.diagnostics = output.diagnostics;

    result.failure = if output.exit_code != Some(0) {
        Some(FailureKind::ExitFailure {
            exit_code: output.exit_code,
        })
    } else if result.audio_bytes == 0 {
        Some(FailureKind::ZeroOutput)
    } else if result.audio_bytes < required_bytes {
        Some(FailureKind::UndersizedOutput {
            actual: result.audio_bytes,
            required: required_bytes,
        })
    } else {
        None
    };

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Result;
    use crate::target::RenderOutput;
    use async_trait::async_trait;

    const MARKER: &str = "[SimpleSynthHost] Batch mode";

    enum FakeBehavior {
        Output {
            bytes: usize,
            exit_code: Option<i32>,
            diagnostics: String,
        },
        LaunchFail,
        TimeOut,
    }

    struct FakeTarget(FakeBehavior);

    #[async_trait]
    impl Renderable for FakeTarget {
        async fn render(
            &self,
            _args: &[String],
            _input: &[u8],
            timeout: Duration,
        ) -> Result<RenderOutput> {
            match &self.0 {
                FakeBehavior::Output {
                    bytes,
                    exit_code,
                    diagnostics,
                } => Ok(RenderOutput {
                    exit_code: *exit_code,
                    audio: vec![0u8; *bytes],
                    diagnostics: diagnostics.clone(),
                }),
                FakeBehavior::LaunchFail => {
                    Err(Error::LaunchFailed("no such executable".to_string()))
                }
                FakeBehavior::TimeOut => Err(Error::Timeout(timeout.as_secs())),
            }
        }
    }

    fn scenario(duration_secs: f64) -> Scenario {
        Scenario {
            name: "test".to_string(),
            description: None,
            duration_secs,
            params: Vec::new(),
            timeout_secs: Some(10),
        }
    }

    fn ok_target(bytes: usize) -> FakeTarget {
        FakeTarget(FakeBehavior::Output {
            bytes,
            exit_code: Some(0),
            diagnostics: format!("{MARKER} (offline render)\n"),
        })
    }

    fn settings() -> RunSettings {
        RunSettings {
            batch_marker: MARKER.to_string(),
            ..RunSettings::default()
        }
    }

    async fn run(target: &FakeTarget, duration_secs: f64) -> ScenarioResult {
        run_scenario(
            target,
            &scenario(duration_secs),
            &crate::fixture::note_pair(),
            &settings(),
        )
        .await
    }

    #[tokio::test]
    async fn test_exact_size_passes_with_marker() {
        let result = run(&ok_target(176_400), 0.5).await;
        assert!(result.passed());
        assert!(result.batch_marker_seen);
        assert_eq!(result.expected_bytes, 176_400);
        assert_eq!(result.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_undersized_output_fails() {
        let result = run(&ok_target(100_000), 0.5).await;
        assert_eq!(
            result.failure,
            Some(FailureKind::UndersizedOutput {
                actual: 100_000,
                required: 158_760,
            })
        );
    }

    #[tokio::test]
    async fn test_ninety_percent_boundary_is_inclusive() {
        // duration 0.2 -> expected 70560, required exactly 63504
        let result = run(&ok_target(63_504), 0.2).await;
        assert!(result.passed(), "boundary must pass: {:?}", result.failure);

        let result = run(&ok_target(63_503), 0.2).await;
        assert!(!result.passed());
    }

    #[tokio::test]
    async fn test_oversized_output_passes() {
        let result = run(&ok_target(200_000), 0.5).await;
        assert!(result.passed());
    }

    #[tokio::test]
    async fn test_zero_output_fails() {
        let result = run(&ok_target(0), 0.5).await;
        assert_eq!(result.failure, Some(FailureKind::ZeroOutput));
    }

    #[tokio::test]
    async fn test_nonzero_exit_fails_before_size_check() {
        let target = FakeTarget(FakeBehavior::Output {
            bytes: 176_400,
            exit_code: Some(3),
            diagnostics: String::new(),
        });
        let result = run(&target, 0.5).await;
        assert_eq!(
            result.failure,
            Some(FailureKind::ExitFailure { exit_code: Some(3) })
        );
    }

    #[tokio::test]
    async fn test_launch_failure_skips_payload_checks() {
        let result = run(&FakeTarget(FakeBehavior::LaunchFail), 0.5).await;
        assert!(matches!(
            result.failure,
            Some(FailureKind::LaunchFailed { .. })
        ));
        assert_eq!(result.audio_bytes, 0);
    }

    #[tokio::test]
    async fn test_timeout_is_never_a_pass() {
        let result = run(&FakeTarget(FakeBehavior::TimeOut), 0.5).await;
        assert_eq!(
            result.failure,
            Some(FailureKind::TimedOut { timeout_secs: 10 })
        );
        // Partial output from a killed run is not trusted
        assert_eq!(result.audio_bytes, 0);
    }

    #[tokio::test]
    async fn test_missing_marker_is_only_a_warning() {
        let target = FakeTarget(FakeBehavior::Output {
            bytes: 176_400,
            exit_code: Some(0),
            diagnostics: "engine up\n".to_string(),
        });
        let result = run(&target, 0.5).await;
        assert!(result.passed());
        assert!(!result.batch_marker_seen);
    }
}
