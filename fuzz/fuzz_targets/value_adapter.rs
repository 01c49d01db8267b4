#![no_main]

use ftr_transform::{ErrorKind, TransformOptions, apply_named};
use libfuzzer_sys::fuzz_target;

const OPERATIONS: [&str; 16] = [
    "dft", "idft", "fft", "ifft", "dht", "fht", "dft2d", "idft2d", "fft2d", "ifft2d", "dht2d",
    "fht2d", "magnitude", "phase", "quadrant_swap", "rfft",
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) else {
        return;
    };
    let name = OPERATIONS[usize::from(selector) % OPERATIONS.len()];
    let options = TransformOptions::default();
    // Any JSON input must produce either a value or a typed error, never a panic.
    let Ok(output) = apply_named(name, &value, &options) else {
        return;
    };
    // Transform output is always acceptable input to the same transform.
    if !matches!(name, "magnitude" | "phase") {
        if let Err(err) = apply_named(name, &output, &options) {
            assert_ne!(err.kind(), ErrorKind::TypeMismatch, "{name}: {err}");
        }
    }
});
