use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type TransformResult<T> = Result<T, TransformError>;

/// Every failure the engine can report. All of them are detected before any
/// output buffer is written.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error("type mismatch: {detail}")]
    TypeMismatch { detail: String },
    #[error("invalid length {len}: {requirement}")]
    InvalidLength {
        len: usize,
        requirement: &'static str,
    },
    #[error("shape mismatch: {detail} (expected {expected}, got {actual})")]
    ShapeMismatch {
        detail: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("non-finite input rejected by policy")]
    NonFiniteInput,
    /// A result overflowed to infinity or NaN and has no JSON encoding.
    #[error("result element {index} is {value}, which JSON cannot represent")]
    NonFiniteOutput { index: usize, value: f64 },
    #[error("unknown transform `{name}`")]
    UnknownTransform { name: String },
}

/// Payload-free discriminant of [`TransformError`], stable across releases
/// and used by fixture files to name the expected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TypeMismatch,
    InvalidLength,
    ShapeMismatch,
    NonFiniteInput,
    NonFiniteOutput,
    UnknownTransform,
}

impl TransformError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Self::NonFiniteInput => ErrorKind::NonFiniteInput,
            Self::NonFiniteOutput { .. } => ErrorKind::NonFiniteOutput,
            Self::UnknownTransform { .. } => ErrorKind::UnknownTransform,
        }
    }

    pub(crate) fn type_mismatch(detail: impl Into<String>) -> Self {
        Self::TypeMismatch {
            detail: detail.into(),
        }
    }
}
