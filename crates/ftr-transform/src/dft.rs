//! Direct O(N^2) discrete Fourier transform.
//!
//! This is the reference the radix-2 path is checked against.

use std::f64::consts::PI;

use crate::sample::Sample;
use crate::transforms::FourierBackend;
use crate::{Algorithm, Direction};

#[derive(Debug, Default)]
pub struct DirectDft;

impl FourierBackend for DirectDft {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Direct
    }

    fn transform_unscaled(&self, data: &mut [Sample], direction: Direction) {
        let output = dft_unscaled(data, direction);
        data.copy_from_slice(&output);
    }
}

/// `X[k] = sum_n x[n] * exp(sign * i * 2 pi k n / N)` without normalization.
#[must_use]
pub fn dft_unscaled(input: &[Sample], direction: Direction) -> Vec<Sample> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }

    let step = direction.sign() * 2.0 * PI / n as f64;
    let mut output = vec![Sample::ZERO; n];
    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = Sample::ZERO;
        for (t, &value) in input.iter().enumerate() {
            // Reduce k * t modulo N so the angle stays small for large N.
            let angle = step * ((k * t) % n) as f64;
            acc += value * Sample::unit(angle);
        }
        *out = acc;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::dft_unscaled;
    use crate::Direction;
    use crate::sample::Sample;

    const ATOL: f64 = 1e-12;

    fn assert_close_sample(actual: Sample, expected: Sample) {
        assert!(
            (actual.re - expected.re).abs() <= ATOL && (actual.im - expected.im).abs() <= ATOL,
            "{actual:?} !~= {expected:?}"
        );
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut input = vec![Sample::ZERO; 8];
        input[0] = Sample::real(1.0);
        for bin in dft_unscaled(&input, Direction::Forward) {
            assert_close_sample(bin, Sample::real(1.0));
        }
    }

    #[test]
    fn constant_concentrates_in_dc_bin() {
        let input = vec![Sample::real(1.0); 4];
        let output = dft_unscaled(&input, Direction::Forward);
        assert_close_sample(output[0], Sample::real(4.0));
        for &bin in &output[1..] {
            assert_close_sample(bin, Sample::ZERO);
        }
    }

    #[test]
    fn inverse_direction_conjugates_the_kernel() {
        let input = [Sample::new(1.0, 2.0), Sample::new(-0.5, 0.25)];
        let forward = dft_unscaled(&input, Direction::Forward);
        let conj_input: Vec<Sample> = input.iter().map(|s| s.conj()).collect();
        let inverse = dft_unscaled(&conj_input, Direction::Inverse);
        for (f, i) in forward.iter().zip(&inverse) {
            assert_close_sample(*f, i.conj());
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dft_unscaled(&[], Direction::Forward).is_empty());
    }
}
