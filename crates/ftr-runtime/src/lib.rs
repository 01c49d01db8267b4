#![forbid(unsafe_code)]

//! FreqTrans runtime: operating mode plus the structured logging and
//! tolerance helpers shared by every test suite in the workspace.
//!
//! ## Module layout
//!
//! | Module      | Contents                                      |
//! |-------------|-----------------------------------------------|
//! | `mode`      | [`RuntimeMode`] enum (Strict / Hardened)      |
//! | `log`       | [`TestLogEntry`] JSON-line records            |
//! | `tolerance` | [`Tolerance`] comparisons for numeric output  |

pub mod log;
pub mod mode;
pub mod tolerance;

pub use log::{LogLevel, Outcome, TestLogEntry};
pub use mode::RuntimeMode;
pub use tolerance::{Mismatch, Tolerance};

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
