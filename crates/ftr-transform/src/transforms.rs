use std::time::Instant;

use crate::dft::DirectDft;
use crate::error::TransformResult;
use crate::fft::Radix2Fft;
use crate::hartley::{self, DirectDht, Radix2Fht};
use crate::sample::{Matrix, Sample, SplitComplex, real_channel};
use crate::trace;
use crate::validation::{
    ensure_matching_channels, validate_real, validate_real_matrix, validate_sample_matrix,
    validate_samples,
};
use crate::{Algorithm, Direction, RuntimeMode, TransformKind, separable};

/// A complex transform algorithm. Implementations never normalize; the
/// caller applies the `1/N` inverse scale.
pub trait FourierBackend {
    fn algorithm(&self) -> Algorithm;
    fn transform_unscaled(&self, data: &mut [Sample], direction: Direction);
}

/// A real Hartley algorithm, unnormalized.
pub trait HartleyBackend {
    fn algorithm(&self) -> Algorithm;
    fn transform_unscaled(&self, data: &mut [f64]);
}

static DIRECT_DFT: DirectDft = DirectDft;
static RADIX2_FFT: Radix2Fft = Radix2Fft;
static DIRECT_DHT: DirectDht = DirectDht;
static RADIX2_FHT: Radix2Fht = Radix2Fht;

fn fourier_backend(algorithm: Algorithm) -> &'static dyn FourierBackend {
    match algorithm {
        Algorithm::Direct => &DIRECT_DFT,
        Algorithm::Radix2 => &RADIX2_FFT,
    }
}

fn hartley_backend(algorithm: Algorithm) -> &'static dyn HartleyBackend {
    match algorithm {
        Algorithm::Direct => &DIRECT_DHT,
        Algorithm::Radix2 => &RADIX2_FHT,
    }
}

/// Options shared by every transform entry point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformOptions {
    pub mode: RuntimeMode,
    /// Reject NaN and infinite components even in Strict mode.
    pub check_finite: bool,
    /// Record a [`TransformTrace`](trace::TransformTrace) for every
    /// successful call. Only the most recent
    /// [`TRACE_CAPACITY`](trace::TRACE_CAPACITY) records are kept; drain
    /// them with [`take_transform_traces`](trace::take_transform_traces).
    pub trace: bool,
}

impl TransformOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// 1D forward DFT, computed directly.
pub fn dft(input: &[Sample], options: &TransformOptions) -> TransformResult<Vec<Sample>> {
    transform(TransformKind::Dft, input, options)
}

/// 1D inverse DFT, scaled by `1/N`.
pub fn idft(input: &[Sample], options: &TransformOptions) -> TransformResult<Vec<Sample>> {
    transform(TransformKind::Idft, input, options)
}

/// 1D forward radix-2 FFT.
pub fn fft(input: &[Sample], options: &TransformOptions) -> TransformResult<Vec<Sample>> {
    transform(TransformKind::Fft, input, options)
}

/// 1D inverse radix-2 FFT, scaled by `1/N`.
pub fn ifft(input: &[Sample], options: &TransformOptions) -> TransformResult<Vec<Sample>> {
    transform(TransformKind::Ifft, input, options)
}

/// 1D orthonormal DHT, computed directly.
pub fn dht(input: &[f64], options: &TransformOptions) -> TransformResult<Vec<f64>> {
    run_real_1d(TransformKind::Dht, input, options)
}

/// 1D orthonormal radix-2 FHT.
pub fn fht(input: &[f64], options: &TransformOptions) -> TransformResult<Vec<f64>> {
    run_real_1d(TransformKind::Fht, input, options)
}

pub fn dft2d(input: &Matrix<Sample>, options: &TransformOptions) -> TransformResult<Matrix<Sample>> {
    transform_2d(TransformKind::Dft, input, options)
}

pub fn idft2d(
    input: &Matrix<Sample>,
    options: &TransformOptions,
) -> TransformResult<Matrix<Sample>> {
    transform_2d(TransformKind::Idft, input, options)
}

pub fn fft2d(input: &Matrix<Sample>, options: &TransformOptions) -> TransformResult<Matrix<Sample>> {
    transform_2d(TransformKind::Fft, input, options)
}

pub fn ifft2d(
    input: &Matrix<Sample>,
    options: &TransformOptions,
) -> TransformResult<Matrix<Sample>> {
    transform_2d(TransformKind::Ifft, input, options)
}

pub fn dht2d(input: &Matrix<f64>, options: &TransformOptions) -> TransformResult<Matrix<f64>> {
    run_real_2d(TransformKind::Dht, input, options)
}

pub fn fht2d(input: &Matrix<f64>, options: &TransformOptions) -> TransformResult<Matrix<f64>> {
    run_real_2d(TransformKind::Fht, input, options)
}

/// Run any transform over a complex sequence.
///
/// Hartley kinds transform the real channel and return samples with a
/// zero imaginary part.
pub fn transform(
    kind: TransformKind,
    input: &[Sample],
    options: &TransformOptions,
) -> TransformResult<Vec<Sample>> {
    validate_samples(kind, input, options)?;

    let started = Instant::now();
    let mut output = input.to_vec();
    apply_kernel(kind, &mut output);
    record(kind, vec![input.len()], options, started);

    Ok(output)
}

/// Overwrite `data` with its transform. On a validation error `data` is
/// left untouched.
pub fn transform_in_place(
    kind: TransformKind,
    data: &mut [Sample],
    options: &TransformOptions,
) -> TransformResult<()> {
    validate_samples(kind, data, options)?;

    let started = Instant::now();
    apply_kernel(kind, data);
    record(kind, vec![data.len()], options, started);

    Ok(())
}

/// Run any transform over planar real/imaginary channels.
pub fn transform_split(
    kind: TransformKind,
    input: &SplitComplex,
    options: &TransformOptions,
) -> TransformResult<SplitComplex> {
    let output = transform(kind, &input.to_samples(), options)?;
    Ok(SplitComplex::from_samples(&output))
}

/// Run any transform over a matrix held as planar real/imaginary channels.
///
/// Both channels must have the same shape. The result channels are in the
/// transposed layout of [`transform_2d`].
pub fn transform_split_2d(
    kind: TransformKind,
    re: &Matrix<f64>,
    im: &Matrix<f64>,
    options: &TransformOptions,
) -> TransformResult<(Matrix<f64>, Matrix<f64>)> {
    ensure_matching_channels(re, im)?;
    let samples = re
        .as_slice()
        .iter()
        .zip(im.as_slice())
        .map(|(&re, &im)| Sample::new(re, im))
        .collect();
    let output = transform_2d(kind, &Matrix::from_vec(re.rows(), re.cols(), samples)?, options)?;

    let (rows, cols) = output.shape();
    let (re, im) = SplitComplex::from_samples(&output.into_vec()).into_channels();
    Ok((Matrix::from_vec(rows, cols, re)?, Matrix::from_vec(rows, cols, im)?))
}

/// Run any transform over a complex matrix via row/column decomposition.
///
/// The output is left in transposed layout; see [`separable`].
pub fn transform_2d(
    kind: TransformKind,
    input: &Matrix<Sample>,
    options: &TransformOptions,
) -> TransformResult<Matrix<Sample>> {
    validate_sample_matrix(kind, input, options)?;

    let started = Instant::now();
    let output = separable::row_column(input, |row| apply_kernel(kind, row));
    record(kind, vec![input.rows(), input.cols()], options, started);

    Ok(output)
}

fn run_real_1d(
    kind: TransformKind,
    input: &[f64],
    options: &TransformOptions,
) -> TransformResult<Vec<f64>> {
    validate_real(input, options)?;

    let started = Instant::now();
    let mut output = input.to_vec();
    apply_hartley(kind.algorithm(), &mut output);
    record(kind, vec![input.len()], options, started);

    Ok(output)
}

fn run_real_2d(
    kind: TransformKind,
    input: &Matrix<f64>,
    options: &TransformOptions,
) -> TransformResult<Matrix<f64>> {
    validate_real_matrix(input, options)?;

    let started = Instant::now();
    let algorithm = kind.algorithm();
    let output = separable::row_column(input, |row| apply_hartley(algorithm, row));
    record(kind, vec![input.rows(), input.cols()], options, started);

    Ok(output)
}

/// The single dispatch point from a transform kind to its kernel.
fn apply_kernel(kind: TransformKind, data: &mut [Sample]) {
    match kind {
        TransformKind::Dft | TransformKind::Idft | TransformKind::Fft | TransformKind::Ifft => {
            let direction = kind.direction();
            fourier_backend(kind.algorithm()).transform_unscaled(data, direction);
            if direction == Direction::Inverse {
                let scale = 1.0 / data.len() as f64;
                for value in data.iter_mut() {
                    *value = value.scale(scale);
                }
            }
        }
        TransformKind::Dht | TransformKind::Fht => {
            let mut channel = real_channel(data);
            apply_hartley(kind.algorithm(), &mut channel);
            for (slot, value) in data.iter_mut().zip(channel) {
                *slot = Sample::real(value);
            }
        }
    }
}

fn apply_hartley(algorithm: Algorithm, data: &mut [f64]) {
    hartley_backend(algorithm).transform_unscaled(data);
    hartley::normalize(data);
}

fn record(kind: TransformKind, shape: Vec<usize>, options: &TransformOptions, started: Instant) {
    if options.trace {
        trace::record_call(kind, shape, options.mode, started.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::{
        TransformOptions, dft, dht, dht2d, fft, fft2d, fht, fht2d, idft, ifft, ifft2d, transform,
        transform_2d, transform_in_place, transform_split, transform_split_2d,
    };
    use crate::error::ErrorKind;
    use crate::sample::{Matrix, Sample, SplitComplex, from_real};
    use crate::trace::take_transform_traces;
    use crate::{RuntimeMode, TransformKind};

    const ATOL: f64 = 1e-8;

    fn assert_close_samples(actual: &[Sample], expected: &[Sample]) {
        assert_eq!(actual.len(), expected.len());
        for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a.re - e.re).abs() <= ATOL && (a.im - e.im).abs() <= ATOL,
                "[{idx}]: {a:?} !~= {e:?}"
            );
        }
    }

    fn assert_close_reals(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() <= ATOL, "[{idx}]: {a} !~= {e}");
        }
    }

    fn samples(pairs: &[(f64, f64)]) -> Vec<Sample> {
        pairs.iter().copied().map(Sample::from).collect()
    }

    #[test]
    fn options_default_to_strict_without_tracing() {
        let opts = TransformOptions::default();
        assert_eq!(opts.mode, RuntimeMode::Strict);
        assert!(!opts.check_finite);
        assert!(!opts.trace);
    }

    #[test]
    fn forward_transforms_of_symmetric_sequence() {
        let input = samples(&[(2.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let expected = samples(&[(6.0, 0.0), (1.0, 1.0), (0.0, 0.0), (1.0, -1.0)]);
        let opts = TransformOptions::default();
        assert_close_samples(&dft(&input, &opts).expect("dft"), &expected);
        assert_close_samples(&fft(&input, &opts).expect("fft"), &expected);
    }

    #[test]
    fn inverse_transforms_recover_symmetric_sequence() {
        let input = samples(&[(6.0, 0.0), (1.0, 1.0), (0.0, 0.0), (1.0, -1.0)]);
        let expected = samples(&[(2.0, 0.0), (1.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let opts = TransformOptions::default();
        assert_close_samples(&idft(&input, &opts).expect("idft"), &expected);
        assert_close_samples(&ifft(&input, &opts).expect("ifft"), &expected);
    }

    #[test]
    fn hartley_pair_is_an_involution() {
        let opts = TransformOptions::default();
        let forward = dht(&[2.0, 1.0, 1.0, 2.0], &opts).expect("dht");
        assert_close_reals(&forward, &[3.0, 0.0, 0.0, 1.0]);
        assert_close_reals(&dht(&forward, &opts).expect("dht"), &[2.0, 1.0, 1.0, 2.0]);

        let forward = fht(&[2.0, 1.0, 1.0, 2.0], &opts).expect("fht");
        assert_close_reals(&forward, &[3.0, 0.0, 0.0, 1.0]);
        assert_close_reals(&fht(&forward, &opts).expect("fht"), &[2.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn length_three_is_rejected_by_every_kind() {
        let input = samples(&[(2.0, 0.0), (1.0, 0.0), (1.0, 0.0)]);
        for kind in TransformKind::ALL {
            let err = transform(kind, &input, &TransformOptions::default())
                .expect_err("length 3 must fail");
            assert_eq!(err.kind(), ErrorKind::InvalidLength, "{kind}");
        }
        let err = dht(&[1.0, 2.0, 3.0], &TransformOptions::default()).expect_err("dht len 3");
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = fft(&[], &TransformOptions::default()).expect_err("empty");
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn generic_hartley_zeroes_imaginary_channel() {
        let input = samples(&[(2.0, 0.5), (1.0, 0.0), (1.0, 0.0), (2.0, -0.5)]);
        let output = transform(TransformKind::Fht, &input, &TransformOptions::default())
            .expect("strict mode ignores imaginary channel");
        assert_close_samples(&output, &from_real(&[3.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn in_place_failure_leaves_buffer_untouched() {
        let mut data = samples(&[(1.0, 0.0), (f64::NAN, 0.0)]);
        let opts = TransformOptions::default().with_check_finite(true);
        let err = transform_in_place(TransformKind::Fft, &mut data, &opts).expect_err("nan");
        assert_eq!(err.kind(), ErrorKind::NonFiniteInput);
        assert_eq!(data[0], Sample::real(1.0));
        assert!(data[1].re.is_nan());
    }

    #[test]
    fn in_place_matches_out_of_place() {
        let input = samples(&[(1.0, -1.0), (0.5, 2.0), (-3.0, 0.0), (0.0, 1.0)]);
        let opts = TransformOptions::default();
        let expected = fft(&input, &opts).expect("fft");
        let mut data = input;
        transform_in_place(TransformKind::Fft, &mut data, &opts).expect("in place");
        assert_close_samples(&data, &expected);
    }

    #[test]
    fn split_channels_follow_sample_transform() {
        let split = SplitComplex::new(vec![2.0, 1.0, 1.0, 2.0], vec![0.0; 4]).expect("split");
        let spectrum =
            transform_split(TransformKind::Dft, &split, &TransformOptions::default()).expect("dft");
        assert_close_reals(spectrum.re(), &[6.0, 1.0, 0.0, 1.0]);
        assert_close_reals(spectrum.im(), &[0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn planar_2d_matches_sample_matrix() {
        let re = Matrix::from_rows(vec![vec![1.0, 2.0, 0.0, -1.0], vec![3.0, 5.0, 1.0, 0.5]])
            .expect("re");
        let im = Matrix::from_rows(vec![vec![0.0, 1.0, 0.0, 0.0], vec![-2.0, 0.0, 0.25, 0.0]])
            .expect("im");
        let joined = Matrix::from_rows(vec![
            samples(&[(1.0, 0.0), (2.0, 1.0), (0.0, 0.0), (-1.0, 0.0)]),
            samples(&[(3.0, -2.0), (5.0, 0.0), (1.0, 0.25), (0.5, 0.0)]),
        ])
        .expect("samples");
        let opts = TransformOptions::default();

        for kind in [TransformKind::Fft, TransformKind::Idft] {
            let (out_re, out_im) = transform_split_2d(kind, &re, &im, &opts).expect("planar");
            let expected = transform_2d(kind, &joined, &opts).expect("samples");
            assert_eq!(out_re.shape(), (4, 2));
            assert_eq!(out_im.shape(), (4, 2));
            let expected_re: Vec<f64> = expected.as_slice().iter().map(|s| s.re).collect();
            let expected_im: Vec<f64> = expected.as_slice().iter().map(|s| s.im).collect();
            assert_close_reals(out_re.as_slice(), &expected_re);
            assert_close_reals(out_im.as_slice(), &expected_im);
        }
    }

    #[test]
    fn planar_2d_round_trip_restores_channels() {
        let re = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 5.0]]).expect("re");
        let im = Matrix::from_rows(vec![vec![0.5, 0.0], vec![0.0, -1.0]]).expect("im");
        let opts = TransformOptions::default();
        let (spec_re, spec_im) =
            transform_split_2d(TransformKind::Dft, &re, &im, &opts).expect("forward");
        let (back_re, back_im) =
            transform_split_2d(TransformKind::Idft, &spec_re, &spec_im, &opts).expect("inverse");
        assert_close_reals(back_re.as_slice(), re.as_slice());
        assert_close_reals(back_im.as_slice(), im.as_slice());
    }

    #[test]
    fn planar_2d_rejects_mismatched_channels() {
        let re = Matrix::from_vec(2, 2, vec![1.0; 4]).expect("re");
        let im = Matrix::from_vec(2, 4, vec![0.0; 8]).expect("im");
        let err = transform_split_2d(TransformKind::Fft, &re, &im, &TransformOptions::default())
            .expect_err("channel shapes differ");
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);

        let odd = Matrix::from_vec(3, 2, vec![1.0; 6]).expect("re");
        let err = transform_split_2d(TransformKind::Fft, &odd, &odd, &TransformOptions::default())
            .expect_err("three rows");
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn fft2d_ifft2d_round_trip() {
        let rows = vec![
            vec![1.0, 1.0, 1.0, 1.0],
            vec![1.0, 2.0, 2.0, 1.0],
            vec![1.0, 2.0, 2.0, 1.0],
            vec![1.0, 1.0, 1.0, 1.0],
        ];
        let input = Matrix::from_rows(rows.iter().map(|r| from_real(r)).collect()).expect("matrix");
        let opts = TransformOptions::default();
        let spectrum = fft2d(&input, &opts).expect("fft2d");
        assert_close_samples(&spectrum.as_slice()[..1], &[Sample::real(20.0)]);
        let recovered = ifft2d(&spectrum, &opts).expect("ifft2d");
        assert_close_samples(recovered.as_slice(), input.as_slice());
    }

    #[test]
    fn hartley_2d_of_centered_block() {
        let input = Matrix::from_rows(vec![
            vec![1.0, 1.0, 1.0, 1.0],
            vec![1.0, 2.0, 2.0, 1.0],
            vec![1.0, 2.0, 2.0, 1.0],
            vec![1.0, 1.0, 1.0, 1.0],
        ])
        .expect("matrix");
        let expected = [
            5.0, 0.0, 0.0, -1.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 0.0, //
            -1.0, 0.0, 0.0, 1.0,
        ];
        let opts = TransformOptions::default();
        for run in [dht2d, fht2d] {
            let spectrum = run(&input, &opts).expect("hartley 2d");
            assert_close_reals(spectrum.as_slice(), &expected);
            let recovered = run(&spectrum, &opts).expect("hartley 2d inverse");
            assert_close_reals(recovered.as_slice(), input.as_slice());
        }
    }

    #[test]
    fn matrix_with_odd_dimension_is_rejected() {
        let input = Matrix::from_vec(4, 3, vec![Sample::ZERO; 12]).expect("matrix");
        let err = fft2d(&input, &TransformOptions::default()).expect_err("3 columns");
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn tracing_records_kind_and_shape() {
        let opts = TransformOptions::default().with_trace(true);
        let input = vec![Sample::real(1.0); 64];
        let _ = fft(&input, &opts).expect("fft");

        let traces = take_transform_traces();
        let ours = traces
            .iter()
            .find(|t| t.kind == TransformKind::Fft && t.shape == vec![64])
            .expect("trace for the 64-point fft");
        assert!(ours.operation_id.starts_with("ftr-op-"));
        assert!(ours.to_json_line().contains("\"kind\":\"fft\""));
    }
}
