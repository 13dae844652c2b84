//! Configuration file handling
//!
//! Everything is optional: with no config file the harness falls back to the
//! stock SimpleSynthHost conventions (44.1 kHz stereo f32 output, batch-mode
//! marker on stderr, PATH lookup for the executable).

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::{Error, Result};

/// Environment variable overriding the target executable path
pub const TARGET_ENV: &str = "SYNTHCHECK_TARGET";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Target host settings
    #[serde(default)]
    pub target: TargetConfig,

    /// Output stream format of the target
    #[serde(default)]
    pub audio: AudioFormat,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

/// Target host settings
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Executable name, used for PATH lookup when no explicit path is given
    #[serde(default = "default_target_name")]
    pub name: String,

    /// Explicit path to the target executable
    pub path: Option<PathBuf>,

    /// stderr substring confirming the target entered batch rendering mode
    #[serde(default = "default_batch_marker")]
    pub batch_marker: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            name: default_target_name(),
            path: None,
            batch_marker: default_batch_marker(),
        }
    }
}

fn default_target_name() -> String {
    "SimpleSynthHost".to_string()
}

fn default_batch_marker() -> String {
    "[SimpleSynthHost] Batch mode".to_string()
}

/// PCM stream format the target is expected to produce
///
/// The target emits raw interleaved samples with no header, so the only
/// structural check available is the byte count:
/// `duration * sample_rate * channels * bytes_per_sample`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AudioFormat {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u32,

    #[serde(default = "default_bytes_per_sample")]
    pub bytes_per_sample: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            bytes_per_sample: default_bytes_per_sample(),
        }
    }
}

fn default_sample_rate() -> u32 {
    44100
}
fn default_channels() -> u32 {
    2
}
fn default_bytes_per_sample() -> u32 {
    4
}

impl AudioFormat {
    /// Theoretical output size in bytes for a render of `duration_secs`
    pub fn expected_bytes(&self, duration_secs: f64) -> u64 {
        let per_second = (self.sample_rate * self.channels * self.bytes_per_sample) as f64;
        (duration_secs * per_second) as u64
    }

    /// Minimum acceptable output size: 90% of theoretical, inclusive.
    ///
    /// The tolerance absorbs engine startup jitter; there is no upper bound
    /// because hosts may legitimately pad trailing audio.
    pub fn required_bytes(&self, duration_secs: f64) -> u64 {
        // Integer arithmetic keeps the boundary exact
        self.expected_bytes(duration_secs) * 9 / 10
    }

    /// Whether `len` bytes of output are acceptable for `duration_secs`
    pub fn size_ok(&self, len: u64, duration_secs: f64) -> bool {
        len >= self.required_bytes(duration_secs)
    }
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Default per-scenario render timeout
    #[serde(default = "default_render")]
    pub render_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            render_secs: default_render(),
        }
    }
}

fn default_render() -> u64 {
    10
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })?;
                return toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }

    /// Resolve the target executable path
    ///
    /// Precedence: CLI flag, `SYNTHCHECK_TARGET` env var, `target.path` in the
    /// config file, then a PATH lookup by `target.name`. The original harness
    /// hardcoded an absolute path here; resolution order makes the binary
    /// location injectable instead.
    pub fn resolve_target(&self, flag: Option<&std::path::Path>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(TARGET_ENV) {
            return Ok(PathBuf::from(path));
        }

        if let Some(path) = &self.target.path {
            return Ok(path.clone());
        }

        which::which(&self.target.name).map_err(|_| {
            Error::target_not_found(
                &self.target.name,
                &["--target", TARGET_ENV, "config [target].path", "PATH"],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_expected_bytes() {
        let format = AudioFormat::default();
        // 0.5 sec * 44100 Hz * 2 channels * 4 bytes
        assert_eq!(format.expected_bytes(0.5), 176_400);
        assert_eq!(format.expected_bytes(0.2), 70_560);
    }

    #[test]
    fn test_size_tolerance_is_inclusive() {
        let format = AudioFormat::default();
        let required = format.required_bytes(0.5);
        assert_eq!(required, 158_760);
        assert!(format.size_ok(required, 0.5));
        assert!(!format.size_ok(required - 1, 0.5));
        // No upper bound: padded output is fine
        assert!(format.size_ok(required * 10, 0.5));
    }

    #[test]
    fn test_config_parses_partial_file() {
        let config: Config = toml::from_str(
            r#"
[target]
path = "/opt/synth/SimpleSynthHost"

[audio]
sample_rate = 48000
"#,
        )
        .unwrap();

        assert_eq!(
            config.target.path.as_deref(),
            Some(std::path::Path::new("/opt/synth/SimpleSynthHost"))
        );
        assert_eq!(config.audio.sample_rate, 48000);
        assert_eq!(config.audio.channels, 2);
        assert_eq!(config.target.batch_marker, "[SimpleSynthHost] Batch mode");
        assert_eq!(config.timeouts.render_secs, 10);
    }

    #[test]
    fn test_resolve_target_prefers_flag() {
        let config = Config::default();
        let path = config
            .resolve_target(Some(std::path::Path::new("/tmp/host")))
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/host"));
    }
}
