//! Error types for roster operations.
//!
//! `AlreadyExists` and `NotFound` are ordinary outcomes: the roster is left
//! untouched and the caller decides what to do. `ConsistencyViolation`
//! means the index and the ordered list disagree, which is a bug.
//!
//! [`PerfError`] covers the performance driver's failures.

use std::fmt;
use thiserror::Error;

/// Failure outcomes of roster operations, carrying the offending id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError<K: fmt::Debug> {
    /// `add` with an id that is already indexed
    #[error("student with id {0:?} already exists")]
    AlreadyExists(K),

    /// Operation on an id that is not indexed
    #[error("student with id {0:?} not found")]
    NotFound(K),

    /// Index and ordered list disagree about membership of an id
    #[error("index and ordered list disagree ({detail}) about student {id:?}")]
    ConsistencyViolation {
        /// Offending id, when the broken node still carries one
        id: Option<K>,
        detail: &'static str,
    },
}

impl<K: fmt::Debug> RosterError<K> {
    pub(crate) fn violation(id: Option<K>, detail: &'static str) -> Self {
        RosterError::ConsistencyViolation { id, detail }
    }

    /// The id the failure refers to, if known.
    pub fn id(&self) -> Option<&K> {
        match self {
            RosterError::AlreadyExists(id) | RosterError::NotFound(id) => Some(id),
            RosterError::ConsistencyViolation { id, .. } => id.as_ref(),
        }
    }

    /// Returns true for the non-fatal outcomes (`AlreadyExists`, `NotFound`).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RosterError::ConsistencyViolation { .. })
    }
}

/// Failures of the performance driver.
#[derive(Debug, Error)]
pub enum PerfError {
    /// Latency histogram could not be created
    #[error("histogram error: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generated workload did not behave as generated (e.g. a duplicate id)
    #[error("workload error: {0}")]
    Workload(String),

    /// Driver configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: RosterError<u64> = RosterError::AlreadyExists(1001);
        assert_eq!(err.to_string(), "student with id 1001 already exists");

        let err: RosterError<String> = RosterError::NotFound("S-0007".to_string());
        assert_eq!(err.to_string(), "student with id \"S-0007\" not found");
    }

    #[test]
    fn test_error_id_and_severity() {
        let err: RosterError<u64> = RosterError::violation(Some(42), "unlinked");
        assert_eq!(err.id(), Some(&42));
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "index and ordered list disagree (unlinked) about student Some(42)"
        );
        assert!(RosterError::NotFound(1u64).is_recoverable());
    }
}
