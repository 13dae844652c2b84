//! Scenario configuration types
//!
//! Scenarios come from two places: the built-in suite mirroring the stock
//! SimpleSynthHost acceptance checks, and YAML suite files supplied on the
//! command line.

use serde::{Deserialize, Serialize};

/// A named rendering scenario
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario verifies
    pub description: Option<String>,
    /// Rendered duration passed to the target as `--duration`
    pub duration_secs: f64,
    /// Host parameters, passed as `--param Name=value` in declaration order
    #[serde(default)]
    pub params: Vec<Param>,
    /// Wall-clock bound on the render; the target is killed past this.
    /// Falls back to the configured default when unset.
    pub timeout_secs: Option<u64>,
}

/// A host parameter assignment
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Scenario {
    /// Effective timeout for this scenario
    pub fn timeout_secs_or(&self, default_secs: u64) -> u64 {
        self.timeout_secs.unwrap_or(default_secs)
    }

    /// Build the target's argument list for this scenario
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["--duration".to_string(), self.duration_secs.to_string()];
        for param in &self.params {
            args.push("--param".to_string());
            args.push(format!("{}={}", param.name, param.value));
        }
        args
    }
}

/// A scenario suite loaded from a YAML file
#[derive(Debug, Deserialize)]
pub struct Suite {
    pub scenarios: Vec<Scenario>,
}

impl Suite {
    /// Load a suite from a YAML file
    pub fn load(path: &std::path::Path) -> crate::common::Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::common::Error::FileRead {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;

        serde_yaml::from_str(&content).map_err(|e| crate::common::Error::suite_parse(path, e))
    }
}

/// The built-in suite: the two renders the original acceptance harness ran
pub fn builtin_suite() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "basic-render".to_string(),
            description: Some("Half-second render with default parameters".to_string()),
            duration_secs: 0.5,
            params: Vec::new(),
            timeout_secs: None,
        },
        Scenario {
            name: "square-wave-render".to_string(),
            description: Some("Short render with the Waveform parameter applied".to_string()),
            duration_secs: 0.2,
            params: vec![Param {
                name: "Waveform".to_string(),
                value: "1".to_string(),
            }],
            timeout_secs: None,
        },
    ]
}
