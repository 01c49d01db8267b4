//! Post-processing of transform output.

use std::f64::consts::PI;

use crate::error::TransformResult;
use crate::sample::{Matrix, Sample};
use crate::validation::ensure_even_shape;

/// `sqrt(re^2 + im^2)` per sample.
#[must_use]
pub fn magnitude(input: &[Sample]) -> Vec<f64> {
    input.iter().map(|sample| sample.norm()).collect()
}

/// `atan2(im, re)` per sample, in radians within `(-pi, pi]`.
#[must_use]
pub fn phase(input: &[Sample]) -> Vec<f64> {
    input.iter().copied().map(sample_phase).collect()
}

#[must_use]
pub fn magnitude_2d(input: &Matrix<Sample>) -> Matrix<f64> {
    input.map(|sample| sample.norm())
}

#[must_use]
pub fn phase_2d(input: &Matrix<Sample>) -> Matrix<f64> {
    input.map(|&sample| sample_phase(sample))
}

fn sample_phase(sample: Sample) -> f64 {
    let angle = sample.im.atan2(sample.re);
    // atan2 returns -pi for a negative real axis approached from -0.0.
    if angle == -PI { PI } else { angle }
}

/// Move the zero-frequency bin of a 1-D spectrum to index `len / 2`, with
/// negative frequencies before it in ascending order.
#[must_use]
pub fn half_swap<T: Clone>(input: &[T]) -> Vec<T> {
    rotate_left_owned(input, input.len().div_ceil(2))
}

/// Inverse of [`half_swap`]; differs from it only for odd lengths.
#[must_use]
pub fn half_unswap<T: Clone>(input: &[T]) -> Vec<T> {
    rotate_left_owned(input, input.len() / 2)
}

/// Exchange the quadrants of a 2-D spectrum diagonally (top-left with
/// bottom-right, top-right with bottom-left), centering the zero frequency.
///
/// Both dimensions must be even; the operation is then its own inverse.
pub fn quadrant_swap<T: Clone>(input: &Matrix<T>) -> TransformResult<Matrix<T>> {
    ensure_even_shape(input.rows(), input.cols())?;

    let rows = input
        .to_rows()
        .iter()
        .map(|row| half_swap(row))
        .collect::<Vec<_>>();
    Matrix::from_rows(half_swap(&rows))
}

fn rotate_left_owned<T: Clone>(input: &[T], shift: usize) -> Vec<T> {
    if input.is_empty() {
        return Vec::new();
    }
    let split = shift % input.len();
    input[split..]
        .iter()
        .cloned()
        .chain(input[..split].iter().cloned())
        .collect()
}
