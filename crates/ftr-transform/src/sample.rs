//! Complex buffer model shared by every transform.
//!
//! A [`Sample`] is one interleaved `(re, im)` pair. Sequences are plain
//! slices of samples; 2-D data lives in a row-major [`Matrix`]. The planar
//! [`SplitComplex`] layout keeps real and imaginary channels in separate
//! buffers and converts losslessly to and from samples.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult};

/// One complex value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    pub re: f64,
    pub im: f64,
}

impl Sample {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[must_use]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Unit-magnitude value `exp(i * angle)`.
    #[must_use]
    pub fn unit(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { re: cos, im: sin }
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    #[must_use]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    #[must_use]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Sample {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl AddAssign for Sample {
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Sample {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Sample {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl From<f64> for Sample {
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

impl From<(f64, f64)> for Sample {
    fn from((re, im): (f64, f64)) -> Self {
        Self { re, im }
    }
}

impl From<Sample> for (f64, f64) {
    fn from(value: Sample) -> Self {
        (value.re, value.im)
    }
}

/// Lift a real sequence into samples with a zero imaginary channel.
#[must_use]
pub fn from_real(values: &[f64]) -> Vec<Sample> {
    values.iter().copied().map(Sample::real).collect()
}

/// The real channel of a sample sequence.
#[must_use]
pub fn real_channel(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|sample| sample.re).collect()
}

/// Parse a flat `[re0, im0, re1, im1, ...]` buffer.
///
/// An odd-length buffer cannot be split into pairs and is a type mismatch.
pub fn samples_from_interleaved(data: &[f64]) -> TransformResult<Vec<Sample>> {
    if !data.len().is_multiple_of(2) {
        return Err(TransformError::type_mismatch(format!(
            "interleaved buffer of length {} has an unpaired trailing component",
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(2)
        .map(|pair| Sample::new(pair[0], pair[1]))
        .collect())
}

#[must_use]
pub fn samples_to_interleaved(samples: &[Sample]) -> Vec<f64> {
    samples
        .iter()
        .flat_map(|sample| [sample.re, sample.im])
        .collect()
}

/// Planar complex buffer: separate real and imaginary channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplitComplex {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl SplitComplex {
    pub fn new(re: Vec<f64>, im: Vec<f64>) -> TransformResult<Self> {
        if re.len() != im.len() {
            return Err(TransformError::ShapeMismatch {
                detail: "imaginary channel length differs from real channel",
                expected: re.len(),
                actual: im.len(),
            });
        }
        Ok(Self { re, im })
    }

    #[must_use]
    pub fn from_samples(samples: &[Sample]) -> Self {
        let (re, im) = samples.iter().map(|s| (s.re, s.im)).unzip();
        Self { re, im }
    }

    #[must_use]
    pub fn to_samples(&self) -> Vec<Sample> {
        self.re
            .iter()
            .zip(&self.im)
            .map(|(&re, &im)| Sample::new(re, im))
            .collect()
    }

    #[must_use]
    pub fn re(&self) -> &[f64] {
        &self.re
    }

    #[must_use]
    pub fn im(&self) -> &[f64] {
        &self.im
    }

    #[must_use]
    pub fn into_channels(self) -> (Vec<f64>, Vec<f64>) {
        (self.re, self.im)
    }
}

/// Row-major rectangular buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Build from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> TransformResult<Self> {
        let expected = rows.checked_mul(cols).ok_or(TransformError::ShapeMismatch {
            detail: "matrix element count overflows usize",
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(TransformError::ShapeMismatch {
                detail: "flat buffer length differs from rows * cols",
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows. Every row must have the length of the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> TransformResult<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(row_count * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TransformError::ShapeMismatch {
                    detail: "row length differs from the first row",
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            data,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, index: usize) -> &[T] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |index| self.row(index))
    }

    pub fn row_iter_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        // Zero-width rows own no data; guard the chunk size so it stays valid.
        self.data.chunks_exact_mut(self.cols.max(1))
    }

    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Matrix<T> {
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.row_iter().map(<[T]>::to_vec).collect()
    }

    /// The `cols x rows` transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col].clone());
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}
