//! Discrete Hartley transform in its orthonormal form.
//!
//! `H[k] = (1 / sqrt(N)) * sum_n x[n] * cas(2 pi k n / N)` with
//! `cas(t) = cos(t) + sin(t)`. The `1 / sqrt(N)` factor makes the transform
//! an exact involution, so there is no separate inverse.

use std::f64::consts::PI;

use crate::Algorithm;
use crate::fft::bit_reverse_permutation;
use crate::transforms::HartleyBackend;

#[derive(Debug, Default)]
pub struct DirectDht;

impl HartleyBackend for DirectDht {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Direct
    }

    fn transform_unscaled(&self, data: &mut [f64]) {
        let output = dht_unscaled(data);
        data.copy_from_slice(&output);
    }
}

#[derive(Debug, Default)]
pub struct Radix2Fht;

impl HartleyBackend for Radix2Fht {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Radix2
    }

    fn transform_unscaled(&self, data: &mut [f64]) {
        fht_in_place(data);
    }
}

/// `cas(t) = cos(t) + sin(t)`.
#[must_use]
pub fn cas(angle: f64) -> f64 {
    let (sin, cos) = angle.sin_cos();
    cos + sin
}

/// Unnormalized direct DHT.
#[must_use]
pub fn dht_unscaled(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }

    let step = 2.0 * PI / n as f64;
    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(t, &value)| value * cas(step * ((k * t) % n) as f64))
                .sum()
        })
        .collect()
}

/// Unnormalized radix-2 FHT in place.
///
/// After the bit-reversal permutation, each stage of length `len` first
/// rotates the odd half of every block: index `k` and its mirror `half - k`
/// are combined with `cos`/`sin` of `2 pi k / len`. Indices `0` and
/// `half / 2` are fixed points of that rotation. The stage then finishes
/// with plain sum/difference butterflies.
pub fn fht_in_place(data: &mut [f64]) {
    let n = data.len();
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    bit_reverse_permutation(data);

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle_step = 2.0 * PI / len as f64;
        for block in data.chunks_exact_mut(len) {
            let (evens, odds) = block.split_at_mut(half);

            for k in 1..half.div_ceil(2) {
                let mirror = half - k;
                let (sin, cos) = (angle_step * k as f64).sin_cos();
                let a = odds[k];
                let b = odds[mirror];
                odds[k] = a * cos + b * sin;
                odds[mirror] = a * sin - b * cos;
            }

            for (even, odd) in evens.iter_mut().zip(odds.iter_mut()) {
                let (a, b) = (*even, *odd);
                *even = a + b;
                *odd = a - b;
            }
        }
        len *= 2;
    }
}

/// Apply the orthonormal `1 / sqrt(N)` scale.
pub fn normalize(data: &mut [f64]) {
    if data.is_empty() {
        return;
    }
    let scale = 1.0 / (data.len() as f64).sqrt();
    for value in data.iter_mut() {
        *value *= scale;
    }
}

#[cfg(test)]
mod tests {
    use super::{cas, dht_unscaled, fht_in_place, normalize};

    fn orthonormal_dht(input: &[f64]) -> Vec<f64> {
        let mut out = dht_unscaled(input);
        normalize(&mut out);
        out
    }

    #[test]
    fn cas_at_quarter_turns() {
        assert!((cas(0.0) - 1.0).abs() < 1e-15);
        assert!((cas(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-15);
        assert!((cas(std::f64::consts::PI) + 1.0).abs() < 1e-15);
    }

    #[test]
    fn dht_of_symmetric_four_point_sequence() {
        let out = orthonormal_dht(&[2.0, 1.0, 1.0, 2.0]);
        let expected = [3.0, 0.0, 0.0, 1.0];
        for (a, e) in out.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{out:?}");
        }
    }

    #[test]
    fn fht_matches_direct_dht_for_asymmetric_input() {
        for exp in 0..8 {
            let n = 1usize << exp;
            let input: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin() + i as f64).collect();
            let expected = dht_unscaled(&input);
            let mut actual = input.clone();
            fht_in_place(&mut actual);
            for (idx, (a, e)) in actual.iter().zip(&expected).enumerate() {
                assert!((a - e).abs() <= 1e-9 * (1.0 + e.abs()), "n={n} [{idx}]: {a} vs {e}");
            }
        }
    }

    #[test]
    fn two_point_fht_is_sum_and_difference() {
        let mut data = [3.0, 1.0];
        fht_in_place(&mut data);
        assert_eq!(data, [4.0, 2.0]);
    }

    #[test]
    fn normalize_empty_is_noop() {
        let mut data: [f64; 0] = [];
        normalize(&mut data);
    }
}
