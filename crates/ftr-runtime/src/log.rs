//! One JSON object per line, written to stderr so `cargo test` captures it
//! next to the failing assertion.

use serde::{Deserialize, Serialize};

use crate::{RuntimeMode, now_unix_ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

/// Structured record of one check: which test, which fixture packet, under
/// which mode, and how it ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLogEntry {
    pub test_id: String,
    pub timestamp_ms: u64,
    pub level: LogLevel,
    pub module: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<RuntimeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl TestLogEntry {
    #[must_use]
    pub fn new(
        test_id: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            timestamp_ms: now_unix_ms(),
            level: LogLevel::Info,
            module: module.into(),
            message: message.into(),
            packet_id: None,
            mode: None,
            outcome: None,
        }
    }

    #[must_use]
    pub fn level(self, level: LogLevel) -> Self {
        Self { level, ..self }
    }

    #[must_use]
    pub fn packet(self, packet_id: impl Into<String>) -> Self {
        Self {
            packet_id: Some(packet_id.into()),
            ..self
        }
    }

    #[must_use]
    pub fn mode(self, mode: RuntimeMode) -> Self {
        Self {
            mode: Some(mode),
            ..self
        }
    }

    /// Record the outcome; a failure also raises the level to `Error`.
    #[must_use]
    pub fn outcome(self, outcome: Outcome) -> Self {
        let level = if outcome == Outcome::Fail {
            LogLevel::Error
        } else {
            self.level
        };
        Self {
            outcome: Some(outcome),
            level,
            ..self
        }
    }

    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    pub fn emit(&self) {
        eprintln!("{}", self.to_json_line());
    }
}
