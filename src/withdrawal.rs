//! Side-effect ports invoked by [`Roster::process_withdrawal`](crate::Roster::process_withdrawal).
//!
//! Neither port may touch the roster; they only observe the departing record.

use crate::student::Student;

/// Tells a course's professor that a student is leaving it.
pub trait Notifier<K> {
    /// Called once per enrolled course, in enrollment order.
    fn notify_withdrawal(&mut self, student: &Student<K>, course: &str);
}

/// Adjusts a student's financial aid after withdrawal.
pub trait FinancialAid<K> {
    /// Called once per withdrawal, after all notifications.
    fn update_financial_aid(&mut self, student: &Student<K>);
}

/// Writes notifications to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleNotifier;

impl<K> Notifier<K> for ConsoleNotifier {
    fn notify_withdrawal(&mut self, student: &Student<K>, course: &str) {
        println!(
            "Notification: Student {} withdrawn from {}",
            student.name, course
        );
    }
}

/// Writes financial aid updates to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleFinancialAid;

impl<K> FinancialAid<K> for ConsoleFinancialAid {
    fn update_financial_aid(&mut self, student: &Student<K>) {
        println!("Financial aid updated for student: {}", student.name);
    }
}

/// Notifier that records `(id, course)` pairs instead of sending anything.
#[derive(Clone, Debug)]
pub struct RecordingNotifier<K> {
    pub notices: Vec<(K, String)>,
}

impl<K> Default for RecordingNotifier<K> {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
        }
    }
}

impl<K: Clone> Notifier<K> for RecordingNotifier<K> {
    fn notify_withdrawal(&mut self, student: &Student<K>, course: &str) {
        self.notices.push((student.id().clone(), course.to_string()));
    }
}

/// Financial aid port that records the ids it was called with.
#[derive(Clone, Debug)]
pub struct RecordingFinancialAid<K> {
    pub updated: Vec<K>,
}

impl<K> Default for RecordingFinancialAid<K> {
    fn default() -> Self {
        Self {
            updated: Vec::new(),
        }
    }
}

impl<K: Clone> FinancialAid<K> for RecordingFinancialAid<K> {
    fn update_financial_aid(&mut self, student: &Student<K>) {
        self.updated.push(student.id().clone());
    }
}
