//! Strict / Hardened operating modes.

use serde::{Deserialize, Serialize};

/// How much the engine trusts its input.
///
/// `Strict` accepts everything the transform contract defines: the
/// imaginary channel of a Hartley input is ignored and non-finite samples
/// flow through the arithmetic. `Hardened` additionally rejects non-finite
/// samples and Hartley inputs that carry a nonzero imaginary part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuntimeMode {
    #[default]
    Strict,
    Hardened,
}

impl RuntimeMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Hardened => "Hardened",
        }
    }

    #[must_use]
    pub const fn is_hardened(self) -> bool {
        matches!(self, Self::Hardened)
    }
}

#[cfg(test)]
mod tests {
    use super::RuntimeMode;

    #[test]
    fn defaults_to_strict() {
        assert_eq!(RuntimeMode::default(), RuntimeMode::Strict);
        assert!(!RuntimeMode::Strict.is_hardened());
        assert!(RuntimeMode::Hardened.is_hardened());
    }

    #[test]
    fn serializes_by_variant_name() {
        let json = serde_json::to_string(&RuntimeMode::Hardened).expect("serialize mode");
        assert_eq!(json, "\"Hardened\"");
        assert_eq!(json.trim_matches('"'), RuntimeMode::Hardened.name());
        let parsed: RuntimeMode = serde_json::from_str("\"Strict\"").expect("parse mode");
        assert_eq!(parsed, RuntimeMode::Strict);
    }
}
