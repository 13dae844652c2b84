//! synthcheck - conformance harness for batch-mode audio rendering hosts
//!
//! Drives an external synth host binary through rendering scenarios: feeds a
//! fixed MIDI event sequence on stdin, captures the raw PCM byte stream from
//! stdout, and checks that the payload has a plausible size for the requested
//! duration. The audio itself is never decoded.

pub mod cli;
pub mod commands;
pub mod common;
pub mod fixture;
pub mod scenario;
pub mod target;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use scenario::{FailureKind, Scenario, ScenarioResult};
pub use target::{ProcessTarget, RenderOutput, Renderable};
