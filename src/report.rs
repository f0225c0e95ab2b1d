//! Console rendering of students and rosters.

use std::fmt;

use crate::roster::{Roster, StudentId};
use crate::student::Student;

const SEPARATOR: &str = "--------------------------------------------------";

impl<K: fmt::Display> fmt::Display for Student<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Student ID: {}", self.id())?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Grades:")?;
        for (course, grade) in &self.grades {
            writeln!(f, "  {}: {}", course, grade)?;
        }
        if !self.courses.is_empty() {
            writeln!(f, "Courses: {}", self.courses.join(", "))?;
        }
        Ok(())
    }
}

/// Full listing of a roster in insertion order.
pub struct RosterReport<'a, K>(pub &'a Roster<K>);

impl<K: StudentId + fmt::Display> fmt::Display for RosterReport<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roster = self.0;
        if roster.is_empty() {
            return writeln!(f, "No students in the system.");
        }

        writeln!(f, "All Students:")?;
        writeln!(f, "{}", SEPARATOR)?;
        for student in roster {
            writeln!(f, "ID: {}, Name: {}", student.id(), student.name)?;
            if !student.grades.is_empty() {
                let grades: Vec<String> = student
                    .grades
                    .iter()
                    .map(|(course, grade)| format!("{}: {}", course, grade))
                    .collect();
                writeln!(f, "Grades: {}", grades.join(" | "))?;
            }
            writeln!(f, "{}", SEPARATOR)?;
        }
        Ok(())
    }
}
