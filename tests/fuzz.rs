//! Fuzz Test - Compares the Roster against a reference implementation.
//!
//! Uses a naive but obviously correct model (a Vec scanned linearly) to
//! verify the roster keeps order, membership and contents identical, and
//! that the index and list never disagree.

use flash_roster::workload::{generate_students, COURSES};
use flash_roster::{Grade, Grades, RecordingFinancialAid, RecordingNotifier, Roster, RosterError};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Simple reference implementation for verification
struct ReferenceRoster {
    students: Vec<(u64, String, Grades, Vec<String>)>,
}

impl ReferenceRoster {
    fn new() -> Self {
        Self {
            students: Vec::new(),
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.students.iter().position(|(sid, ..)| *sid == id)
    }

    fn add(&mut self, id: u64, name: &str, grades: Grades) -> bool {
        if self.position(id).is_some() {
            return false;
        }
        self.students.push((id, name.to_string(), grades, Vec::new()));
        true
    }

    fn delete(&mut self, id: u64) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.students.remove(pos);
                true
            }
            None => false,
        }
    }

    fn update_grade(&mut self, id: u64, course: &str, grade: Grade) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.students[pos].2.insert(course.to_string(), grade);
                true
            }
            None => false,
        }
    }

    fn enroll(&mut self, id: u64, course: &str) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.students[pos].3.push(course.to_string());
                true
            }
            None => false,
        }
    }

    fn courses(&self, id: u64) -> Vec<String> {
        self.position(id)
            .map(|pos| self.students[pos].3.clone())
            .unwrap_or_default()
    }

    fn ids(&self) -> Vec<u64> {
        self.students.iter().map(|(id, ..)| *id).collect()
    }
}

fn assert_matches_reference(roster: &Roster<u64>, reference: &ReferenceRoster, op: usize) {
    roster
        .check_consistency()
        .unwrap_or_else(|e| panic!("Consistency violation at op {}: {}", op, e));

    let roster_ids: Vec<u64> = roster.iter().map(|s| *s.id()).collect();
    assert_eq!(roster_ids, reference.ids(), "Order mismatch at op {}", op);
    assert_eq!(roster.len(), reference.students.len(), "Size mismatch at op {}", op);

    // Every listed id is searchable and vice versa
    for id in &roster_ids {
        assert!(roster.search(id).is_some(), "Listed id {} not searchable at op {}", id, op);
    }
}

#[test]
fn test_fuzz_against_reference() {
    const SEED: u64 = 0xDEADBEEF;
    const OPS: usize = 10_000;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut roster = Roster::new();
    let mut reference = ReferenceRoster::new();
    let mut next_id = 1u64;

    for op in 0..OPS {
        let known: Vec<u64> = reference.ids();
        // Mostly target present ids, sometimes absent ones
        let target = if known.is_empty() || rng.gen_bool(0.1) {
            rng.gen_range(1..next_id + 10)
        } else {
            known[rng.gen_range(0..known.len())]
        };

        match rng.gen_range(0..100) {
            0..=39 => {
                let id = if rng.gen_bool(0.9) {
                    next_id += 1;
                    next_id
                } else {
                    target
                };
                let grades = generate_students(&mut rng, 1).remove(0).grades;
                let expected = reference.add(id, "Fuzz", grades.clone());
                let result = roster.add(id, "Fuzz", Some(grades));
                assert_eq!(result.is_ok(), expected, "Add mismatch at op {}", op);
                if !expected {
                    assert_eq!(result.unwrap_err(), RosterError::AlreadyExists(id));
                }
            }
            40..=64 => {
                let expected = reference.delete(target);
                let result = roster.delete(&target);
                assert_eq!(result.is_ok(), expected, "Delete mismatch at op {}", op);
            }
            65..=84 => {
                let course = COURSES[rng.gen_range(0..COURSES.len())];
                let grade = Grade::from(rng.gen_range(0u32..=100));
                let expected = reference.update_grade(target, course, grade.clone());
                let result = roster.update_grade(&target, course, grade);
                assert_eq!(result.is_ok(), expected, "Update mismatch at op {}", op);
            }
            85..=94 => {
                let course = COURSES[rng.gen_range(0..COURSES.len())];
                let expected = reference.enroll(target, course);
                assert_eq!(roster.enroll(&target, course).is_ok(), expected);
            }
            _ => {
                let courses = reference.courses(target);
                let expected = reference.delete(target);
                let mut notifier = RecordingNotifier::default();
                let mut aid = RecordingFinancialAid::default();
                let result = roster.process_withdrawal(&target, &mut notifier, &mut aid);

                assert_eq!(result.is_ok(), expected, "Withdrawal mismatch at op {}", op);
                if expected {
                    let notified: Vec<String> =
                        notifier.notices.into_iter().map(|(_, c)| c).collect();
                    assert_eq!(notified, courses);
                    assert_eq!(aid.updated, vec![target]);
                } else {
                    assert!(notifier.notices.is_empty());
                    assert!(aid.updated.is_empty());
                }
            }
        }

        assert_matches_reference(&roster, &reference, op);
    }
}

#[test]
fn test_fuzz_record_contents() {
    const SEED: u64 = 0xBADC0DE;
    const OPS: usize = 5_000;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut roster = Roster::new();
    let mut reference = ReferenceRoster::new();

    for op in 0..OPS {
        let id = rng.gen_range(0..200u64);
        if rng.gen_bool(0.5) {
            let mut grades = Grades::new();
            grades.insert("Math".to_string(), Grade::from("B"));
            reference.add(id, "Content", grades.clone());
            let _ = roster.add(id, "Content", Some(grades));
        } else if rng.gen_bool(0.5) {
            reference.delete(id);
            let _ = roster.delete(&id);
        } else {
            let grade = Grade::from(rng.gen_range(50u32..=100));
            reference.update_grade(id, "Physics", grade.clone());
            let _ = roster.update_grade(&id, "Physics", grade);
        }

        if op % 100 == 0 {
            for (id, name, grades, _) in &reference.students {
                let student = roster.search(id).expect("Reference student missing");
                assert_eq!(&student.name, name);
                assert_eq!(&student.grades, grades, "Grades mismatch for {} at op {}", id, op);
            }
        }
    }

    assert_matches_reference(&roster, &reference, OPS);
}
