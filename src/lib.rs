//! # Flash-Roster
//!
//! An in-memory student roster with insertion-order traversal and O(1)
//! lookup by id.
//!
//! ## Design Principles
//!
//! - **One Owner**: The roster exclusively owns every record; callers borrow
//! - **Two Views, One Structure**: An arena-backed doubly linked list keeps
//!   insertion order, an FxHashMap indexes ids, and both change together
//! - **O(1) Operations**: Add, Search, Update, Delete all run in constant time
//! - **Arena Allocation**: Deleted slots are recycled through a free list
//!
//! ## Architecture
//!
//! ```text
//! [Driver / Bench] --> [Command] --> [Engine] --> [Roster] --> [Arena + StudentList + Index]
//!                                       |
//!                                [Output Events]
//! ```

pub mod arena;
pub mod student;
pub mod student_list;
pub mod gpa;
pub mod roster;
pub mod withdrawal;
pub mod command;
pub mod engine;
pub mod report;
pub mod workload;
pub mod perf;
pub mod error;

// Re-exports for convenience
pub use arena::{Arena, ArenaIndex, StudentNode, NULL_INDEX};
pub use command::{AddStudent, Command, OutputEvent, RejectReason};
pub use engine::Engine;
pub use error::{PerfError, RosterError};
pub use report::RosterReport;
pub use roster::{Roster, StudentId};
pub use student::{Grade, Grades, Student};
pub use student_list::StudentList;
pub use withdrawal::{
    ConsoleFinancialAid, ConsoleNotifier, FinancialAid, Notifier, RecordingFinancialAid,
    RecordingNotifier,
};
