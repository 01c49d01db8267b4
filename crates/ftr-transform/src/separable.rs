//! Row/column decomposition shared by every 2-D transform.
//!
//! The 1-D kernel runs over each row, the intermediate matrix is
//! transposed, and the kernel runs over each row again. The result is
//! returned in that transposed layout: an `R x C` input yields a `C x R`
//! output whose row `c` holds frequency column `c`. Applying a second
//! separable pass transposes back, so forward-then-inverse restores the
//! original orientation.

use crate::sample::Matrix;

/// Run `kernel` over rows, transpose, run it over rows again.
#[must_use]
pub fn row_column<T: Clone>(input: &Matrix<T>, mut kernel: impl FnMut(&mut [T])) -> Matrix<T> {
    let mut first = input.clone();
    for row in first.row_iter_mut() {
        kernel(row);
    }
    let mut second = first.transpose();
    for row in second.row_iter_mut() {
        kernel(row);
    }
    second
}
