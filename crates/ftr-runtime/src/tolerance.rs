//! Numeric comparison with combined absolute and relative tolerance:
//! `|actual - expected| <= atol + rtol * |expected|`. Two NaNs compare equal.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub atol: f64,
    pub rtol: f64,
}

/// First element that fell outside the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// `[i]` for slices, `[row, col]` for rows; empty for a length mismatch.
    pub index: Vec<usize>,
    pub actual: f64,
    pub expected: f64,
    pub bound: f64,
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.index.is_empty() {
            return write!(
                f,
                "length mismatch: actual={} expected={}",
                self.actual, self.expected
            );
        }
        write!(
            f,
            "{:?}: actual={} expected={} diff={} bound={}",
            self.index,
            self.actual,
            self.expected,
            (self.actual - self.expected).abs(),
            self.bound
        )
    }
}

impl Tolerance {
    /// Absolute `1e-8`, the transform round-trip tolerance.
    pub const DEFAULT: Self = Self::absolute(1e-8);
    pub const EXACT: Self = Self::absolute(0.0);

    #[must_use]
    pub const fn new(atol: f64, rtol: f64) -> Self {
        Self { atol, rtol }
    }

    #[must_use]
    pub const fn absolute(atol: f64) -> Self {
        Self { atol, rtol: 0.0 }
    }

    #[must_use]
    pub fn bound(&self, expected: f64) -> f64 {
        self.atol + self.rtol * expected.abs()
    }

    #[must_use]
    pub fn accepts(&self, actual: f64, expected: f64) -> bool {
        if actual.is_nan() && expected.is_nan() {
            return true;
        }
        (actual - expected).abs() <= self.bound(expected)
    }

    #[must_use]
    pub fn first_mismatch(&self, actual: &[f64], expected: &[f64]) -> Option<Mismatch> {
        if actual.len() != expected.len() {
            return Some(length_mismatch(actual.len(), expected.len()));
        }
        actual
            .iter()
            .zip(expected)
            .position(|(&a, &e)| !self.accepts(a, e))
            .map(|idx| Mismatch {
                index: vec![idx],
                actual: actual[idx],
                expected: expected[idx],
                bound: self.bound(expected[idx]),
            })
    }

    #[must_use]
    pub fn first_row_mismatch(&self, actual: &[Vec<f64>], expected: &[Vec<f64>]) -> Option<Mismatch> {
        if actual.len() != expected.len() {
            return Some(length_mismatch(actual.len(), expected.len()));
        }
        actual
            .iter()
            .zip(expected)
            .enumerate()
            .find_map(|(row, (a, e))| {
                self.first_mismatch(a, e).map(|mut mismatch| {
                    mismatch.index.insert(0, row);
                    mismatch
                })
            })
    }

    /// Panic with the first mismatch, if any.
    pub fn assert_slice(&self, actual: &[f64], expected: &[f64]) {
        if let Some(mismatch) = self.first_mismatch(actual, expected) {
            panic!("tolerance exceeded at {mismatch} ({self:?})");
        }
    }

    pub fn assert_rows(&self, actual: &[Vec<f64>], expected: &[Vec<f64>]) {
        if let Some(mismatch) = self.first_row_mismatch(actual, expected) {
            panic!("tolerance exceeded at {mismatch} ({self:?})");
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn length_mismatch(actual: usize, expected: usize) -> Mismatch {
    Mismatch {
        index: Vec::new(),
        actual: actual as f64,
        expected: expected as f64,
        bound: 0.0,
    }
}
