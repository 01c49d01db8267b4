#![forbid(unsafe_code)]

//! Frequency-domain transform engine.
//!
//! Converts finite sequences of real or complex samples between the
//! time/space domain and the frequency domain for 1-D and 2-D data:
//!
//! - Fourier family: direct DFT/IDFT and radix-2 FFT/IFFT
//! - Hartley family: direct DHT and radix-2 FHT (orthonormal, self-inverse)
//! - 2-D separable extensions of all of the above
//! - post-processing: magnitude, phase, quadrant swap
//!
//! Every entry point validates its input before computing anything and
//! never retains a reference to caller data after returning.

pub mod dft;
pub mod error;
pub mod fft;
pub mod hartley;
pub mod sample;
pub mod separable;
pub mod tools;
pub mod trace;
pub mod transforms;
pub mod validation;
pub mod value;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{ErrorKind, TransformError, TransformResult};
pub use ftr_runtime::RuntimeMode;
pub use sample::{Matrix, Sample, SplitComplex};
pub use tools::{half_swap, half_unswap, magnitude, magnitude_2d, phase, phase_2d, quadrant_swap};
pub use trace::{TRACE_CAPACITY, TransformTrace, take_transform_traces};
pub use transforms::{
    TransformOptions, dft, dft2d, dht, dht2d, fft, fft2d, fht, fht2d, idft, idft2d, ifft, ifft2d,
    transform, transform_2d, transform_in_place, transform_split, transform_split_2d,
};
pub use value::apply_named;

/// The six transforms the engine implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Dft,
    Idft,
    Fft,
    Ifft,
    Dht,
    Fht,
}

/// Fourier transforms produce complex spectra; Hartley transforms stay real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformFamily {
    Fourier,
    Hartley,
}

/// How a transform is computed. Both algorithms of a family agree to
/// floating-point tolerance; only their cost differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// O(N^2) summation straight from the definition.
    Direct,
    /// O(N log N) decimation-in-time over power-of-two lengths.
    Radix2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Sign of the exponent in `exp(sign * i * 2 pi k n / N)`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => -1.0,
            Self::Inverse => 1.0,
        }
    }
}

impl TransformKind {
    pub const ALL: [Self; 6] = [
        Self::Dft,
        Self::Idft,
        Self::Fft,
        Self::Ifft,
        Self::Dht,
        Self::Fht,
    ];

    #[must_use]
    pub const fn family(self) -> TransformFamily {
        match self {
            Self::Dft | Self::Idft | Self::Fft | Self::Ifft => TransformFamily::Fourier,
            Self::Dht | Self::Fht => TransformFamily::Hartley,
        }
    }

    #[must_use]
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Dft | Self::Idft | Self::Dht => Algorithm::Direct,
            Self::Fft | Self::Ifft | Self::Fht => Algorithm::Radix2,
        }
    }

    /// Hartley transforms are their own inverse and always report `Forward`.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Idft | Self::Ifft => Direction::Inverse,
            Self::Dft | Self::Fft | Self::Dht | Self::Fht => Direction::Forward,
        }
    }

    /// The transform that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Dft => Self::Idft,
            Self::Idft => Self::Dft,
            Self::Fft => Self::Ifft,
            Self::Ifft => Self::Fft,
            Self::Dht => Self::Dht,
            Self::Fht => Self::Fht,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dft => "dft",
            Self::Idft => "idft",
            Self::Fft => "fft",
            Self::Ifft => "ifft",
            Self::Dht => "dht",
            Self::Fht => "fht",
        }
    }
}

impl Display for TransformKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    /// Accepts the canonical names plus `rdft`/`rfft`, the historical names
    /// of the reverse Fourier transforms.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "dft" => Ok(Self::Dft),
            "idft" | "rdft" => Ok(Self::Idft),
            "fft" => Ok(Self::Fft),
            "ifft" | "rfft" => Ok(Self::Ifft),
            "dht" => Ok(Self::Dht),
            "fht" => Ok(Self::Fht),
            other => Err(TransformError::UnknownTransform {
                name: other.to_owned(),
            }),
        }
    }
}
