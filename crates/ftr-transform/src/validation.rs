//! Precondition gate run before every transform.
//!
//! Nothing in here computes or mutates; a call either returns `Ok(())` or
//! the first violated precondition.

use crate::error::{TransformError, TransformResult};
use crate::sample::{Matrix, Sample};
use crate::transforms::TransformOptions;
use crate::{TransformFamily, TransformKind};

pub const POWER_OF_TWO: &str = "length must be a power of two";
pub const EVEN_NON_EMPTY: &str = "dimension must be even and non-zero";

/// Reject lengths that are not `2^k` (including zero).
pub fn ensure_power_of_two(len: usize) -> TransformResult<()> {
    if len.is_power_of_two() {
        Ok(())
    } else {
        Err(TransformError::InvalidLength {
            len,
            requirement: POWER_OF_TWO,
        })
    }
}

/// Both dimensions of a matrix must satisfy the kernel length rule.
pub fn ensure_power_of_two_shape(rows: usize, cols: usize) -> TransformResult<()> {
    ensure_power_of_two(rows)?;
    ensure_power_of_two(cols)
}

/// Quadrant swap is defined for even, non-empty dimensions only.
pub fn ensure_even_shape(rows: usize, cols: usize) -> TransformResult<()> {
    for len in [rows, cols] {
        if len == 0 || !len.is_multiple_of(2) {
            return Err(TransformError::InvalidLength {
                len,
                requirement: EVEN_NON_EMPTY,
            });
        }
    }
    Ok(())
}

/// The two planar channels of one matrix must have the same shape.
pub fn ensure_matching_channels(re: &Matrix<f64>, im: &Matrix<f64>) -> TransformResult<()> {
    if re.rows() != im.rows() {
        return Err(TransformError::ShapeMismatch {
            detail: "imaginary channel row count differs from real channel",
            expected: re.rows(),
            actual: im.rows(),
        });
    }
    if re.cols() != im.cols() {
        return Err(TransformError::ShapeMismatch {
            detail: "imaginary channel column count differs from real channel",
            expected: re.cols(),
            actual: im.cols(),
        });
    }
    Ok(())
}

/// Full check for a complex 1-D input to `kind`.
pub fn validate_samples(
    kind: TransformKind,
    input: &[Sample],
    options: &TransformOptions,
) -> TransformResult<()> {
    ensure_power_of_two(input.len())?;
    validate_sample_values(kind, input, options)
}

/// Full check for a real 1-D Hartley input.
pub fn validate_real(input: &[f64], options: &TransformOptions) -> TransformResult<()> {
    ensure_power_of_two(input.len())?;
    if should_check_finite(options) && input.iter().any(|value| !value.is_finite()) {
        return Err(TransformError::NonFiniteInput);
    }
    Ok(())
}

/// Full check for a complex matrix input to `kind`.
pub fn validate_sample_matrix(
    kind: TransformKind,
    input: &Matrix<Sample>,
    options: &TransformOptions,
) -> TransformResult<()> {
    ensure_power_of_two_shape(input.rows(), input.cols())?;
    validate_sample_values(kind, input.as_slice(), options)
}

/// Full check for a real Hartley matrix.
pub fn validate_real_matrix(input: &Matrix<f64>, options: &TransformOptions) -> TransformResult<()> {
    ensure_power_of_two_shape(input.rows(), input.cols())?;
    if should_check_finite(options) && input.as_slice().iter().any(|value| !value.is_finite()) {
        return Err(TransformError::NonFiniteInput);
    }
    Ok(())
}

fn validate_sample_values(
    kind: TransformKind,
    input: &[Sample],
    options: &TransformOptions,
) -> TransformResult<()> {
    if should_check_finite(options) && input.iter().any(|sample| !sample.is_finite()) {
        return Err(TransformError::NonFiniteInput);
    }
    if kind.family() == TransformFamily::Hartley && options.mode.is_hardened() {
        if let Some(index) = input.iter().position(|sample| sample.im != 0.0) {
            return Err(TransformError::type_mismatch(format!(
                "element {index} has a nonzero imaginary part; {kind} requires real input"
            )));
        }
    }
    Ok(())
}

fn should_check_finite(options: &TransformOptions) -> bool {
    options.check_finite || options.mode.is_hardened()
}
