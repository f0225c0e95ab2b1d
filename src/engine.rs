//! Engine - command dispatcher over a [`Roster`].
//!
//! Turns [`Command`]s into roster calls and reports every outcome, including
//! the side effects of a withdrawal, as [`OutputEvent`]s.

use crate::command::{AddStudent, Command, OutputEvent, RejectReason};
use crate::roster::{Roster, StudentId};
use crate::withdrawal::{RecordingFinancialAid, RecordingNotifier};

/// Synchronous command processor.
///
/// Each command runs to completion before the next starts; there is no
/// interleaving to guard against.
pub struct Engine<K> {
    /// The underlying roster
    pub roster: Roster<K>,
}

impl<K: StudentId> Engine<K> {
    /// Create a new engine with room for `capacity` students.
    pub fn new(capacity: usize) -> Self {
        Self {
            roster: Roster::with_capacity(capacity),
        }
    }

    /// Process a single command and return output events.
    ///
    /// This is the main entry point for drivers, tests and benchmarks.
    pub fn process_command(&mut self, cmd: Command<K>) -> Vec<OutputEvent<K>> {
        match cmd {
            Command::Add(AddStudent { id, name, grades }) => {
                match self.roster.add(id.clone(), name, Some(grades)) {
                    Ok(()) => vec![OutputEvent::Added { id }],
                    Err(err) => vec![Self::rejected(id, RejectReason::from(&err))],
                }
            }
            Command::Delete { id } => match self.roster.delete(&id) {
                Ok(_) => vec![OutputEvent::Deleted { id }],
                Err(err) => vec![Self::rejected(id, RejectReason::from(&err))],
            },
            Command::UpdateGrade { id, course, grade } => {
                match self.roster.update_grade(&id, course.clone(), grade) {
                    Ok(()) => vec![OutputEvent::GradeUpdated { id, course }],
                    Err(err) => vec![Self::rejected(id, RejectReason::from(&err))],
                }
            }
            Command::Enroll { id, course } => match self.roster.enroll(&id, course.clone()) {
                Ok(()) => vec![OutputEvent::Enrolled { id, course }],
                Err(err) => vec![Self::rejected(id, RejectReason::from(&err))],
            },
            Command::Withdraw { id } => self.process_withdrawal(id),
        }
    }

    /// Run the withdrawal workflow, reporting each side effect in call order.
    fn process_withdrawal(&mut self, id: K) -> Vec<OutputEvent<K>> {
        let mut notifier = RecordingNotifier::default();
        let mut aid = RecordingFinancialAid::default();

        match self.roster.process_withdrawal(&id, &mut notifier, &mut aid) {
            Ok(_) => {
                let mut events: Vec<OutputEvent<K>> = notifier
                    .notices
                    .into_iter()
                    .map(|(id, course)| OutputEvent::ProfessorNotified { id, course })
                    .collect();
                events.extend(
                    aid.updated
                        .into_iter()
                        .map(|id| OutputEvent::FinancialAidUpdated { id }),
                );
                events.push(OutputEvent::Withdrawn { id });
                events
            }
            Err(err) => vec![Self::rejected(id, RejectReason::from(&err))],
        }
    }

    #[inline]
    fn rejected(id: K, reason: RejectReason) -> OutputEvent<K> {
        OutputEvent::Rejected { id, reason }
    }

    /// Get total student count.
    #[inline]
    pub fn student_count(&self) -> usize {
        self.roster.len()
    }

    /// Compute state hash for determinism testing.
    #[inline]
    pub fn state_hash(&self) -> u64 {
        self.roster.state_hash()
    }
}

impl<K: StudentId> Default for Engine<K> {
    fn default() -> Self {
        Self::new(10_000)
    }
}
