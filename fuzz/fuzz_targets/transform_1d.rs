#![no_main]

use arbitrary::Arbitrary;
use ftr_runtime::RuntimeMode;
use ftr_transform::{Sample, TransformKind, TransformOptions, transform, transform_in_place};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Transform1dInput {
    kind: u8,
    hardened: bool,
    check_finite: bool,
    values: Vec<(f64, f64)>,
}

fuzz_target!(|input: Transform1dInput| {
    let kind = TransformKind::ALL[usize::from(input.kind) % TransformKind::ALL.len()];
    let mode = if input.hardened {
        RuntimeMode::Hardened
    } else {
        RuntimeMode::Strict
    };
    let options = TransformOptions::default()
        .with_mode(mode)
        .with_check_finite(input.check_finite);
    let samples: Vec<Sample> = input.values.iter().take(4096).copied().map(Sample::from).collect();

    let out_of_place = transform(kind, &samples, &options);
    let mut data = samples.clone();
    let in_place = transform_in_place(kind, &mut data, &options);
    assert_eq!(out_of_place.is_ok(), in_place.is_ok());
    match out_of_place {
        Ok(output) => assert_eq!(output.len(), samples.len()),
        // A rejected call must leave the buffer as it was.
        Err(_) => assert!(
            data.iter()
                .zip(&samples)
                .all(|(a, b)| a.re.to_bits() == b.re.to_bits() && a.im.to_bits() == b.im.to_bits())
        ),
    }
});
