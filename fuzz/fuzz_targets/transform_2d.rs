#![no_main]

use arbitrary::Arbitrary;
use ftr_transform::{
    Matrix, Sample, TransformKind, TransformOptions, quadrant_swap, transform_2d,
    transform_split_2d,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Transform2dInput {
    kind: u8,
    rows: u8,
    cols: u8,
    values: Vec<(f64, f64)>,
}

fuzz_target!(|input: Transform2dInput| {
    let kind = TransformKind::ALL[usize::from(input.kind) % TransformKind::ALL.len()];
    let rows = usize::from(input.rows % 33);
    let cols = usize::from(input.cols % 33);
    let mut data = vec![Sample::ZERO; rows * cols];
    for (slot, value) in data.iter_mut().zip(input.values.iter().copied()) {
        *slot = Sample::from(value);
    }
    let Ok(matrix) = Matrix::from_vec(rows, cols, data) else {
        return;
    };

    let options = TransformOptions::default();
    if let Ok(output) = transform_2d(kind, &matrix, &options) {
        assert_eq!(output.shape(), (cols, rows));
        let re = matrix.map(|s| s.re);
        let im = matrix.map(|s| s.im);
        let (out_re, out_im) =
            transform_split_2d(kind, &re, &im, &options).expect("planar form of a valid matrix");
        assert_eq!(out_re.shape(), output.shape());
        assert_eq!(out_im.shape(), output.shape());
    }
    if let Ok(swapped) = quadrant_swap(&matrix) {
        assert_eq!(swapped.shape(), matrix.shape());
    }
});
