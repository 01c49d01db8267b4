//! Radix-2 decimation-in-time FFT.
//!
//! The buffer is permuted into bit-reversed order and then combined in
//! `log2(N)` butterfly stages, each doubling the sub-transform length.
//! Lengths must be powers of two; the transform API validates that before
//! a backend is ever invoked.

use std::f64::consts::PI;

use crate::sample::Sample;
use crate::transforms::FourierBackend;
use crate::{Algorithm, Direction};

#[derive(Debug, Default)]
pub struct Radix2Fft;

impl FourierBackend for Radix2Fft {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Radix2
    }

    fn transform_unscaled(&self, data: &mut [Sample], direction: Direction) {
        fft_in_place(data, direction);
    }
}

/// In-place bit-reversal permutation.
pub(crate) fn bit_reverse_permutation<T>(data: &mut [T]) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());
    if n <= 2 {
        return;
    }
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            data.swap(i, j);
        }
    }
}

/// Unnormalized radix-2 transform of `data` in place.
pub fn fft_in_place(data: &mut [Sample], direction: Direction) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    bit_reverse_permutation(data);

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle_step = direction.sign() * PI / half as f64;
        for block in data.chunks_exact_mut(len) {
            let (evens, odds) = block.split_at_mut(half);
            for (k, (even, odd)) in evens.iter_mut().zip(odds.iter_mut()).enumerate() {
                let product = *odd * Sample::unit(angle_step * k as f64);
                *odd = *even - product;
                *even = *even + product;
            }
        }
        len *= 2;
    }
}
