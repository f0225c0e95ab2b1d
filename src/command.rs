//! Command and Event types for the roster engine.
//!
//! Commands are inputs from a driver (replays, benchmarks, demos).
//! Events are what the engine reports back for each command.

use crate::error::RosterError;
use crate::student::{Grade, Grades};

// ============================================================================
// Input Commands
// ============================================================================

/// Add a new student
#[derive(Clone, Debug, PartialEq)]
pub struct AddStudent<K> {
    /// Student id (must be unique)
    pub id: K,
    /// Display name
    pub name: String,
    /// Initial grades (may be empty)
    pub grades: Grades,
}

/// Input commands from a driver
#[derive(Clone, Debug, PartialEq)]
pub enum Command<K> {
    /// Add a student at the end of the roster
    Add(AddStudent<K>),
    /// Delete a student
    Delete { id: K },
    /// Insert or overwrite one course grade
    UpdateGrade { id: K, course: String, grade: Grade },
    /// Enroll a student in a course
    Enroll { id: K, course: String },
    /// Run the withdrawal workflow
    Withdraw { id: K },
}

impl<K> Command<K> {
    /// The id the command targets
    pub fn id(&self) -> &K {
        match self {
            Command::Add(add) => &add.id,
            Command::Delete { id }
            | Command::UpdateGrade { id, .. }
            | Command::Enroll { id, .. }
            | Command::Withdraw { id } => id,
        }
    }
}

// ============================================================================
// Output Events
// ============================================================================

/// Reasons for command rejection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RejectReason {
    /// Student id already exists
    AlreadyExists = 0,
    /// Student not found
    NotFound = 1,
    /// Index and list disagreed; the roster is corrupt
    Inconsistent = 2,
}

impl<K: std::fmt::Debug> From<&RosterError<K>> for RejectReason {
    fn from(err: &RosterError<K>) -> Self {
        match err {
            RosterError::AlreadyExists(_) => RejectReason::AlreadyExists,
            RosterError::NotFound(_) => RejectReason::NotFound,
            RosterError::ConsistencyViolation { .. } => RejectReason::Inconsistent,
        }
    }
}

/// Output events from the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputEvent<K> {
    /// Student added
    Added { id: K },
    /// Student deleted
    Deleted { id: K },
    /// Grade set
    GradeUpdated { id: K, course: String },
    /// Course enrollment recorded
    Enrolled { id: K, course: String },
    /// A course's professor was told about a withdrawal
    ProfessorNotified { id: K, course: String },
    /// Financial aid was updated for a withdrawal
    FinancialAidUpdated { id: K },
    /// Withdrawal finished; the student is gone
    Withdrawn { id: K },
    /// Command rejected; the roster is unchanged
    Rejected { id: K, reason: RejectReason },
}
