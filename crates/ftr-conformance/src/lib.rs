#![forbid(unsafe_code)]

//! Fixture-driven conformance harness.
//!
//! A packet fixture is a JSON file holding a list of cases. Each case names
//! one or more operations (applied in order through
//! [`ftr_transform::apply_named`]), an input value, and either the expected
//! output values or the expected error kind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ftr_runtime::{RuntimeMode, Tolerance, now_unix_ms};
use ftr_transform::{ErrorKind, TransformOptions, TransformResult, apply_named};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub fixture_root: PathBuf,
    pub artifact_root: PathBuf,
}

impl HarnessConfig {
    #[must_use]
    pub fn default_paths() -> Self {
        let fixture_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        Self {
            artifact_root: fixture_root.join("artifacts"),
            fixture_root,
        }
    }

    #[must_use]
    pub fn artifact_dir_for(&self, packet_id: &str) -> PathBuf {
        self.artifact_root.join(packet_id)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::default_paths()
    }
}

/// What `run_smoke` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeReport {
    /// Fixture file names, sorted.
    pub packets: Vec<String>,
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    Values {
        values: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        atol: Option<f64>,
    },
    Error {
        error: ErrorKind,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformCase {
    pub case_id: String,
    /// Applied left to right; the output of one feeds the next.
    pub operations: Vec<String>,
    #[serde(default)]
    pub mode: RuntimeMode,
    #[serde(default)]
    pub check_finite: bool,
    pub input: Value,
    pub expected: ExpectedOutcome,
}

impl TransformCase {
    #[must_use]
    pub fn options(&self) -> TransformOptions {
        TransformOptions::default()
            .with_mode(self.mode)
            .with_check_finite(self.check_finite)
    }

    /// Run every operation in order, stopping at the first error.
    pub fn execute(&self) -> TransformResult<Value> {
        let options = self.options();
        self.operations
            .iter()
            .try_fold(self.input.clone(), |value, name| {
                apply_named(name, &value, &options)
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PacketFixture {
    pub packet_id: String,
    pub family: String,
    pub cases: Vec<TransformCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseResult {
    pub case_id: String,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PacketReport {
    pub packet_id: String,
    pub family: String,
    pub cases: Vec<CaseResult>,
    pub generated_at_ms: u64,
}

impl PacketReport {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    #[must_use]
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| !case.passed)
    }
}

/// Counts only; what a dashboard line shows per packet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PacketSummary {
    pub packet_id: String,
    pub family: String,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, HarnessError> {
    let raw = fs::read_to_string(path).map_err(|source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| HarnessError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// List the fixture packets without running them.
#[must_use]
pub fn run_smoke(config: &HarnessConfig) -> SmokeReport {
    let mut packets: Vec<String> = fs::read_dir(&config.fixture_root)
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_name()?.to_str().map(str::to_owned))
        .collect();
    packets.sort();
    SmokeReport { packets }
}

pub fn load_packet(config: &HarnessConfig, fixture_name: &str) -> Result<PacketFixture, HarnessError> {
    read_json(&config.fixture_root.join(fixture_name))
}

/// Load `fixture_name` and run every case in it.
pub fn run_transform_packet(
    config: &HarnessConfig,
    fixture_name: &str,
) -> Result<PacketReport, HarnessError> {
    let PacketFixture {
        packet_id,
        family,
        cases,
    } = load_packet(config, fixture_name)?;
    Ok(PacketReport {
        packet_id,
        family,
        cases: cases.iter().map(run_case).collect(),
        generated_at_ms: now_unix_ms(),
    })
}

#[must_use]
pub fn run_case(case: &TransformCase) -> CaseResult {
    let (passed, message) = match (&case.expected, case.execute()) {
        (ExpectedOutcome::Values { values, atol }, Ok(actual)) => {
            let tolerance = atol.map_or(Tolerance::DEFAULT, Tolerance::absolute);
            if values_close(&actual, values, tolerance) {
                (true, "output matched expected values".to_owned())
            } else {
                (
                    false,
                    format!("mismatch (atol={}): expected {values}, got {actual}", tolerance.atol),
                )
            }
        }
        (ExpectedOutcome::Error { error }, Err(actual)) => {
            if *error == actual.kind() {
                (true, "error matched expected contract".to_owned())
            } else {
                (
                    false,
                    format!("mismatch: expected error {error:?}, got `{actual}`"),
                )
            }
        }
        (ExpectedOutcome::Values { .. }, Err(actual)) => {
            (false, format!("expected values, got error `{actual}`"))
        }
        (ExpectedOutcome::Error { error }, Ok(actual)) => (
            false,
            format!("expected error {error:?}, got values {actual}"),
        ),
    };

    CaseResult {
        case_id: case.case_id.clone(),
        passed,
        message,
    }
}

/// Write `report.json` under the packet's artifact directory.
pub fn write_packet_report(
    config: &HarnessConfig,
    report: &PacketReport,
) -> Result<PathBuf, HarnessError> {
    let dir = config.artifact_dir_for(&report.packet_id);
    let path = dir.join("report.json");
    let bytes = serde_json::to_vec_pretty(report)?;
    fs::create_dir_all(&dir)
        .and_then(|()| fs::write(&path, bytes))
        .map_err(|source| HarnessError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

pub fn load_packet_report(path: &Path) -> Result<PacketReport, HarnessError> {
    read_json(path)
}

#[must_use]
pub fn packet_summary(report: &PacketReport) -> PacketSummary {
    PacketSummary {
        packet_id: report.packet_id.clone(),
        family: report.family.clone(),
        passed: report.passed(),
        failed: report.failed(),
        total: report.cases.len(),
    }
}

/// `{"re", "im"}` objects and `[re, im]` pairs both read as a sample.
fn as_pair(value: &Value) -> Option<(f64, f64)> {
    match value {
        Value::Object(map) if map.len() == 2 => map
            .get("re")
            .and_then(Value::as_f64)
            .zip(map.get("im").and_then(Value::as_f64)),
        Value::Array(items) if items.len() == 2 => items[0].as_f64().zip(items[1].as_f64()),
        _ => None,
    }
}

/// Structural comparison with a numeric tolerance.
fn values_close(actual: &Value, expected: &Value, tolerance: Tolerance) -> bool {
    if let (Some(a), Some(e)) = (as_pair(actual), as_pair(expected)) {
        return tolerance.accepts(a.0, e.0) && tolerance.accepts(a.1, e.1);
    }
    match (actual, expected) {
        (Value::Number(_), Value::Number(_)) => actual
            .as_f64()
            .zip(expected.as_f64())
            .is_some_and(|(a, e)| tolerance.accepts(a, e)),
        (Value::Array(a), Value::Array(e)) => {
            a.len() == e.len() && a.iter().zip(e).all(|(x, y)| values_close(x, y, tolerance))
        }
        _ => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ExpectedOutcome, PacketReport, TransformCase, packet_summary, run_case, values_close};
    use ftr_runtime::{RuntimeMode, Tolerance};
    use ftr_transform::ErrorKind;

    fn case(operations: &[&str], input: serde_json::Value, expected: ExpectedOutcome) -> TransformCase {
        TransformCase {
            case_id: "unit".to_owned(),
            operations: operations.iter().map(|s| (*s).to_owned()).collect(),
            mode: RuntimeMode::Strict,
            check_finite: false,
            input,
            expected,
        }
    }

    #[test]
    fn pairs_and_objects_compare_equal() {
        assert!(values_close(
            &json!([{ "re": 1.0, "im": -1.0 }]),
            &json!([[1.0, -1.0 + 1e-12]]),
            Tolerance::DEFAULT
        ));
        assert!(!values_close(&json!([1.0, 2.0]), &json!([1.0, 2.1]), Tolerance::DEFAULT));
        assert!(!values_close(&json!([1.0]), &json!([1.0, 2.0, 3.0]), Tolerance::DEFAULT));
        assert!(values_close(&json!([["a", "b"]]), &json!([["a", "b"]]), Tolerance::EXACT));
    }

    #[test]
    fn pipeline_applies_operations_in_order() {
        let input = json!([[1.0, 2.0], [3.0, -1.0], [0.0, 0.0], [-2.0, 5.0]]);
        let result = run_case(&case(
            &["fft", "ifft"],
            input.clone(),
            ExpectedOutcome::Values {
                values: input,
                atol: None,
            },
        ));
        assert!(result.passed, "{}", result.message);
    }

    #[test]
    fn expected_error_kind_is_matched() {
        let result = run_case(&case(
            &["fft"],
            json!([2.0, 1.0, 1.0, 2.0]),
            ExpectedOutcome::Error {
                error: ErrorKind::TypeMismatch,
            },
        ));
        assert!(result.passed, "{}", result.message);

        let result = run_case(&case(
            &["fft"],
            json!([[1.0, 0.0], [1.0, 0.0]]),
            ExpectedOutcome::Error {
                error: ErrorKind::InvalidLength,
            },
        ));
        assert!(!result.passed);
        assert!(result.message.contains("got values"));
    }

    #[test]
    fn summary_counts_cases() {
        let report = PacketReport {
            packet_id: "FTR-P00".to_owned(),
            family: "unit".to_owned(),
            generated_at_ms: 0,
            cases: vec![
                run_case(&case(
                    &["dht"],
                    json!([2.0, 1.0, 1.0, 2.0]),
                    ExpectedOutcome::Values {
                        values: json!([3.0, 0.0, 0.0, 1.0]),
                        atol: None,
                    },
                )),
                run_case(&case(
                    &["dht"],
                    json!([1.0, 2.0, 3.0]),
                    ExpectedOutcome::Values {
                        values: json!([0.0]),
                        atol: None,
                    },
                )),
            ],
        };
        let summary = packet_summary(&report);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn case_defaults_to_strict_mode() {
        let parsed: TransformCase = serde_json::from_value(json!({
            "case_id": "defaults",
            "operations": ["fht"],
            "input": [1.0, 1.0],
            "expected": { "kind": "error", "error": "type_mismatch" }
        }))
        .expect("minimal case parses");
        assert_eq!(parsed.mode, RuntimeMode::Strict);
        assert!(!parsed.check_finite);
    }
}
