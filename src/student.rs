//! Student records and grade values.

use std::collections::BTreeMap;
use std::fmt;

/// Course name -> grade. Ordered so reports and GPA accumulation are stable.
pub type Grades = BTreeMap<String, Grade>;

/// A single course grade: either a 0-100 score or a letter grade.
#[derive(Clone, Debug, PartialEq)]
pub enum Grade {
    /// Numeric score on a 100-point scale
    Score(f64),
    /// Letter grade such as "A-" or "B+"
    Letter(String),
}

impl From<f64> for Grade {
    fn from(score: f64) -> Self {
        Grade::Score(score)
    }
}

impl From<u32> for Grade {
    fn from(score: u32) -> Self {
        Grade::Score(score as f64)
    }
}

impl From<&str> for Grade {
    fn from(letter: &str) -> Self {
        Grade::Letter(letter.to_string())
    }
}

impl From<String> for Grade {
    fn from(letter: String) -> Self {
        Grade::Letter(letter)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Score(score) => write!(f, "{}", score),
            Grade::Letter(letter) => f.write_str(letter),
        }
    }
}

/// A student record owned by a [`Roster`](crate::Roster).
///
/// The id is fixed at creation; everything else may be edited in place
/// through [`Roster::search_mut`](crate::Roster::search_mut).
#[derive(Clone, Debug, PartialEq)]
pub struct Student<K> {
    id: K,
    /// Display name
    pub name: String,
    /// Course -> grade
    pub grades: Grades,
    /// Enrolled course names, in enrollment order
    pub courses: Vec<String>,
}

impl<K> Student<K> {
    pub(crate) fn new(id: K, name: String, grades: Grades) -> Self {
        Self {
            id,
            name,
            grades,
            courses: Vec::new(),
        }
    }

    /// The immutable student id.
    #[inline]
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Set (or overwrite) the grade for a course.
    pub fn set_grade(&mut self, course: impl Into<String>, grade: impl Into<Grade>) {
        self.grades.insert(course.into(), grade.into());
    }

    /// Enroll in a course. Duplicate enrollments are kept as given.
    pub fn add_course(&mut self, course: impl Into<String>) {
        self.courses.push(course.into());
    }

    /// Drop the first enrollment matching `course`, if any.
    pub fn remove_course(&mut self, course: &str) -> bool {
        match self.courses.iter().position(|c| c == course) {
            Some(pos) => {
                self.courses.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Approximate heap + inline bytes held by this record.
    pub fn footprint(&self) -> usize {
        let grades: usize = self
            .grades
            .iter()
            .map(|(course, grade)| {
                let letter = match grade {
                    Grade::Letter(l) => l.capacity(),
                    Grade::Score(_) => 0,
                };
                course.capacity() + letter + std::mem::size_of::<(String, Grade)>()
            })
            .sum();
        let courses: usize = self.courses.iter().map(|c| c.capacity()).sum::<usize>()
            + self.courses.capacity() * std::mem::size_of::<String>();

        std::mem::size_of::<Self>() + self.name.capacity() + grades + courses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_conversions() {
        assert_eq!(Grade::from(88u32), Grade::Score(88.0));
        assert_eq!(Grade::from("B+"), Grade::Letter("B+".to_string()));
        assert_eq!(Grade::from(92.5).to_string(), "92.5");
        assert_eq!(Grade::from(90u32).to_string(), "90");
    }

    #[test]
    fn test_set_grade_overwrites() {
        let mut s = Student::new(1u64, "John Doe".to_string(), Grades::new());
        s.set_grade("Math", 85u32);
        s.set_grade("Math", "A");
        assert_eq!(s.grades.len(), 1);
        assert_eq!(s.grades["Math"], Grade::Letter("A".to_string()));
    }

    #[test]
    fn test_courses() {
        let mut s = Student::new(1u64, "Jane".to_string(), Grades::new());
        s.add_course("Math");
        s.add_course("Physics");
        s.add_course("Math");

        assert!(s.remove_course("Math"));
        assert_eq!(s.courses, vec!["Physics".to_string(), "Math".to_string()]);
        assert!(!s.remove_course("Biology"));
    }

    #[test]
    fn test_footprint_grows_with_content() {
        let empty = Student::new(1u64, String::new(), Grades::new());
        let mut full = Student::new(1u64, "Bob Johnson".to_string(), Grades::new());
        full.set_grade("Math", 78u32);
        full.add_course("Math");
        assert!(full.footprint() > empty.footprint());
    }
}
