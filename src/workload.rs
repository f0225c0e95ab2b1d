//! Synthetic student data for drivers, benchmarks and tests.
//!
//! Everything is derived from a seeded [`ChaCha8Rng`], so a seed fully
//! determines the generated roster.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::command::{AddStudent, Command};
use crate::student::{Grade, Grades};

/// Courses students are graded in
pub const COURSES: [&str; 5] = ["Math", "Physics", "Chemistry", "Biology", "Computer Science"];

/// First generated student id
pub const FIRST_ID: u64 = 1000;

/// Courses graded per generated student
pub const COURSES_PER_STUDENT: usize = 3;

/// Generate `size` students with ids `FIRST_ID..FIRST_ID + size`, each graded
/// 60-100 in three distinct courses.
pub fn generate_students(rng: &mut impl Rng, size: usize) -> Vec<AddStudent<u64>> {
    (0..size)
        .map(|i| {
            let grades: Grades = COURSES
                .choose_multiple(rng, COURSES_PER_STUDENT)
                .map(|course| (course.to_string(), Grade::from(rng.gen_range(60u32..=100))))
                .collect();

            AddStudent {
                id: FIRST_ID + i as u64,
                name: format!("Student_{}", i),
                grades,
            }
        })
        .collect()
}

/// Generate a seeded mixed command stream over a churning set of students.
///
/// Roughly half the commands add, the rest delete, regrade, enroll or
/// withdraw a currently present student. A small share deliberately targets
/// ids that were never added or re-adds a present id.
pub fn generate_commands(seed: u64, count: usize) -> Vec<Command<u64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut commands = Vec::with_capacity(count);
    let mut active: Vec<u64> = Vec::new();
    let mut next_id = FIRST_ID;

    for _ in 0..count {
        let roll = rng.gen_range(0..100);

        if active.is_empty() || roll < 50 {
            let mut student = generate_students(&mut rng, 1).remove(0);
            student.id = next_id;
            student.name = format!("Student_{}", next_id - FIRST_ID);
            next_id += 1;
            active.push(student.id);
            commands.push(Command::Add(student));
        } else if roll < 60 {
            let idx = rng.gen_range(0..active.len());
            let id = active.swap_remove(idx);
            commands.push(Command::Delete { id });
        } else if roll < 80 {
            let id = active[rng.gen_range(0..active.len())];
            let course = COURSES[rng.gen_range(0..COURSES.len())].to_string();
            commands.push(Command::UpdateGrade {
                id,
                course,
                grade: Grade::from(rng.gen_range(60u32..=100)),
            });
        } else if roll < 90 {
            let id = active[rng.gen_range(0..active.len())];
            let course = COURSES[rng.gen_range(0..COURSES.len())].to_string();
            commands.push(Command::Enroll { id, course });
        } else if roll < 95 {
            let idx = rng.gen_range(0..active.len());
            let id = active.swap_remove(idx);
            commands.push(Command::Withdraw { id });
        } else if roll < 98 {
            commands.push(Command::Delete { id: next_id + 1_000_000 });
        } else {
            let id = active[rng.gen_range(0..active.len())];
            commands.push(Command::Add(AddStudent {
                id,
                name: "Duplicate".to_string(),
                grades: Grades::new(),
            }));
        }
    }

    commands
}
