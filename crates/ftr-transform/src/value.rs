//! Dynamic-value adapter over `serde_json::Value`.
//!
//! Typed callers cannot hand a string to [`fft`](crate::fft); callers that
//! carry untyped data (fixture files, scripting front ends) can. This module
//! is where such input is checked element by element and turned into
//! [`Sample`]s, so it is the one place [`TransformError::TypeMismatch`] is
//! raised for element types.

use std::str::FromStr;

use serde_json::{Number, Value, json};

use crate::error::{TransformError, TransformResult};
use crate::sample::{Matrix, Sample, real_channel};
use crate::tools::{magnitude, magnitude_2d, phase, phase_2d, quadrant_swap};
use crate::transforms::{TransformOptions, transform, transform_2d};
use crate::{TransformFamily, TransformKind};

/// Which JSON element shapes count as a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPolicy {
    /// `{"re", "im"}` objects and `[re, im]` pairs only.
    ComplexOnly,
    /// Additionally accept a bare number `x` as `(x, 0)`.
    RealAllowed,
}

impl ElementPolicy {
    #[must_use]
    pub const fn for_kind(kind: TransformKind) -> Self {
        match kind.family() {
            TransformFamily::Fourier => Self::ComplexOnly,
            TransformFamily::Hartley => Self::RealAllowed,
        }
    }
}

/// Everything [`apply_named`] can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Transform(TransformKind),
    Transform2d(TransformKind),
    Magnitude,
    Magnitude2d,
    Phase,
    Phase2d,
    QuadrantSwap,
}

impl FromStr for Operation {
    type Err = TransformError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "magnitude" => return Ok(Self::Magnitude),
            "magnitude2d" => return Ok(Self::Magnitude2d),
            "phase" => return Ok(Self::Phase),
            "phase2d" => return Ok(Self::Phase2d),
            "quadrant_swap" => return Ok(Self::QuadrantSwap),
            _ => {}
        }
        let parsed = match name.strip_suffix("2d") {
            Some(base) => base.parse().map(Self::Transform2d),
            None => name.parse().map(Self::Transform),
        };
        parsed.map_err(|_| TransformError::UnknownTransform {
            name: name.to_owned(),
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert one element under `policy`; `index` only feeds the error text.
pub fn sample_from_value(
    value: &Value,
    policy: ElementPolicy,
    index: usize,
) -> TransformResult<Sample> {
    let complex = match value {
        Value::Object(map) if map.len() == 2 => map
            .get("re")
            .and_then(Value::as_f64)
            .zip(map.get("im").and_then(Value::as_f64)),
        Value::Array(pair) if pair.len() == 2 => pair[0].as_f64().zip(pair[1].as_f64()),
        Value::Number(_) if policy == ElementPolicy::RealAllowed => {
            value.as_f64().map(|re| (re, 0.0))
        }
        _ => None,
    };
    complex.map(Sample::from).ok_or_else(|| {
        let wanted = match policy {
            ElementPolicy::ComplexOnly => "a complex sample",
            ElementPolicy::RealAllowed => "a number or a complex sample",
        };
        TransformError::type_mismatch(format!(
            "element {index} is {}, expected {wanted}",
            describe(value)
        ))
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("an array of {} items", items.len()),
        Value::Object(_) => String::from("an object without numeric `re`/`im`"),
        other => format!("a {}", type_name(other)),
    }
}

/// Convert a JSON array into a sequence.
pub fn samples_from_value(value: &Value, policy: ElementPolicy) -> TransformResult<Vec<Sample>> {
    let Value::Array(items) = value else {
        return Err(TransformError::type_mismatch(format!(
            "input is a {}, expected an array",
            type_name(value)
        )));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| sample_from_value(item, policy, index))
        .collect()
}

fn rows_from_value(value: &Value) -> TransformResult<Vec<&Vec<Value>>> {
    let Value::Array(rows) = value else {
        return Err(TransformError::type_mismatch(format!(
            "input is a {}, expected an array of rows",
            type_name(value)
        )));
    };
    rows.iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Array(items) => Ok(items),
            other => Err(TransformError::type_mismatch(format!(
                "row {index} is a {}, expected an array",
                type_name(other)
            ))),
        })
        .collect()
}

/// Convert an array of equal-length arrays into a matrix of samples.
/// Element indices in errors are row-major.
pub fn matrix_from_value(value: &Value, policy: ElementPolicy) -> TransformResult<Matrix<Sample>> {
    let rows = rows_from_value(value)?;
    let width = rows.first().map_or(0, |row| row.len());
    let mut converted = Vec::with_capacity(rows.len());
    for (r, row) in rows.iter().enumerate() {
        let samples = row
            .iter()
            .enumerate()
            .map(|(c, item)| sample_from_value(item, policy, r * width + c))
            .collect::<TransformResult<Vec<_>>>()?;
        converted.push(samples);
    }
    Matrix::from_rows(converted)
}

fn value_matrix(value: &Value) -> TransformResult<Matrix<Value>> {
    let rows = rows_from_value(value)?;
    Matrix::from_rows(rows.into_iter().cloned().collect())
}

/// Fourier output as `{"re", "im"}` objects.
pub fn samples_to_value(samples: &[Sample]) -> TransformResult<Value> {
    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| sample_value(sample, index))
        .collect::<TransformResult<Vec<_>>>()
        .map(Value::Array)
}

pub fn reals_to_value(values: &[f64]) -> TransformResult<Value> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| finite_number(value, index))
        .collect::<TransformResult<Vec<_>>>()
        .map(Value::Array)
}

/// Nested rows, converting each element with `element`. The second
/// argument is the row-major index of the element.
pub fn matrix_to_value<T>(
    matrix: &Matrix<T>,
    element: impl Fn(&T, usize) -> TransformResult<Value>,
) -> TransformResult<Value> {
    let cols = matrix.cols();
    matrix
        .row_iter()
        .enumerate()
        .map(|(row_index, row)| {
            row.iter()
                .enumerate()
                .map(|(col, item)| element(item, row_index * cols + col))
                .collect::<TransformResult<Vec<_>>>()
                .map(Value::Array)
        })
        .collect::<TransformResult<Vec<_>>>()
        .map(Value::Array)
}

/// JSON has no encoding for infinities or NaN, so an overflowed result is
/// an error instead of a silent `null`.
fn finite_number(value: f64, index: usize) -> TransformResult<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(TransformError::NonFiniteOutput { index, value })
}

fn sample_value(sample: &Sample, index: usize) -> TransformResult<Value> {
    Ok(json!({
        "re": finite_number(sample.re, index)?,
        "im": finite_number(sample.im, index)?,
    }))
}

/// Parse `name`, convert `input`, run the operation and convert back.
///
/// Fourier results are arrays of `{"re", "im"}` objects. Hartley results
/// are plain numbers. `magnitude`/`phase` return numbers and
/// `quadrant_swap` returns the same elements it was given, rearranged.
/// A result that overflowed to a non-finite value fails with
/// [`TransformError::NonFiniteOutput`].
pub fn apply_named(name: &str, input: &Value, options: &TransformOptions) -> TransformResult<Value> {
    match name.parse::<Operation>()? {
        Operation::Transform(kind) => {
            let samples = samples_from_value(input, ElementPolicy::for_kind(kind))?;
            let output = transform(kind, &samples, options)?;
            match kind.family() {
                TransformFamily::Fourier => samples_to_value(&output),
                TransformFamily::Hartley => reals_to_value(&real_channel(&output)),
            }
        }
        Operation::Transform2d(kind) => {
            let matrix = matrix_from_value(input, ElementPolicy::for_kind(kind))?;
            let output = transform_2d(kind, &matrix, options)?;
            match kind.family() {
                TransformFamily::Fourier => matrix_to_value(&output, sample_value),
                TransformFamily::Hartley => {
                    matrix_to_value(&output, |sample, index| finite_number(sample.re, index))
                }
            }
        }
        Operation::Magnitude => {
            let samples = samples_from_value(input, ElementPolicy::ComplexOnly)?;
            reals_to_value(&magnitude(&samples))
        }
        Operation::Phase => {
            let samples = samples_from_value(input, ElementPolicy::ComplexOnly)?;
            reals_to_value(&phase(&samples))
        }
        Operation::Magnitude2d => {
            let matrix = matrix_from_value(input, ElementPolicy::ComplexOnly)?;
            matrix_to_value(&magnitude_2d(&matrix), |&value, index| finite_number(value, index))
        }
        Operation::Phase2d => {
            let matrix = matrix_from_value(input, ElementPolicy::ComplexOnly)?;
            matrix_to_value(&phase_2d(&matrix), |&value, index| finite_number(value, index))
        }
        Operation::QuadrantSwap => {
            let swapped = quadrant_swap(&value_matrix(input)?)?;
            matrix_to_value(&swapped, |value, _| Ok(value.clone()))
        }
    }
}
