//! Opt-in structured trace of transform calls.
//!
//! Enabled per call through [`TransformOptions::trace`](crate::TransformOptions).
//! The log keeps the most recent [`TRACE_CAPACITY`] records and drops the
//! oldest beyond that; callers drain it with [`take_transform_traces`].

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Algorithm, Direction, RuntimeMode, TransformKind};

/// Records retained between drains.
pub const TRACE_CAPACITY: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformTrace {
    /// `ftr-op-` followed by the 16-digit hex sequence number.
    pub operation_id: String,
    pub kind: TransformKind,
    pub direction: Direction,
    pub algorithm: Algorithm,
    /// `[n]` for sequences, `[rows, cols]` for matrices.
    pub shape: Vec<usize>,
    pub mode: RuntimeMode,
    pub timing_ns: u64,
}

impl TransformTrace {
    fn new(
        sequence: u64,
        kind: TransformKind,
        shape: Vec<usize>,
        mode: RuntimeMode,
        elapsed: Duration,
    ) -> Self {
        Self {
            operation_id: format!("ftr-op-{sequence:016x}"),
            kind,
            direction: kind.direction(),
            algorithm: kind.algorithm(),
            shape,
            mode,
            timing_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Ring of traced calls. The sequence keeps counting across drains and
/// evictions, so an operation id is never reused within a process.
#[derive(Debug)]
struct TraceLog {
    next_sequence: u64,
    capacity: usize,
    records: VecDeque<TransformTrace>,
}

impl TraceLog {
    const fn with_capacity(capacity: usize) -> Self {
        Self {
            next_sequence: 1,
            capacity,
            records: VecDeque::new(),
        }
    }

    fn record(&mut self, kind: TransformKind, shape: Vec<usize>, mode: RuntimeMode, elapsed: Duration) {
        let trace = TransformTrace::new(self.next_sequence, kind, shape, mode, elapsed);
        self.next_sequence += 1;
        self.records.push_back(trace);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    fn drain(&mut self) -> Vec<TransformTrace> {
        self.records.drain(..).collect()
    }
}

static TRACE_LOG: Mutex<TraceLog> = Mutex::new(TraceLog::with_capacity(TRACE_CAPACITY));

pub(crate) fn record_call(kind: TransformKind, shape: Vec<usize>, mode: RuntimeMode, elapsed: Duration) {
    // A poisoned log only loses diagnostics.
    if let Ok(mut log) = TRACE_LOG.lock() {
        log.record(kind, shape, mode, elapsed);
    }
}

/// Drain every retained trace, oldest first.
#[must_use]
pub fn take_transform_traces() -> Vec<TransformTrace> {
    TRACE_LOG
        .lock()
        .map(|mut log| log.drain())
        .unwrap_or_default()
}
