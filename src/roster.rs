//! Roster - the student collection.
//!
//! Records live in an [`Arena`]; a [`StudentList`] threads them in insertion
//! order and an FxHashMap indexes them by id. Both structures are private
//! and every mutation updates them together, so membership in one always
//! matches membership in the other.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::{Arena, ArenaIndex, NULL_INDEX};
use crate::error::RosterError;
use crate::gpa;
use crate::student::{Grade, Grades, Student};
use crate::student_list::{Iter, StudentList};
use crate::withdrawal::{FinancialAid, Notifier};

/// Mapping from student id to ArenaIndex for O(1) lookup
pub type StudentIndex<K> = FxHashMap<K, ArenaIndex>;

/// Bounds required of a student id.
pub trait StudentId: Eq + Hash + Clone + fmt::Debug {}

impl<T: Eq + Hash + Clone + fmt::Debug> StudentId for T {}

/// Insertion-ordered, id-indexed collection of students.
///
/// Records are owned exclusively by the roster. [`search`](Self::search),
/// [`search_mut`](Self::search_mut), [`get_all`](Self::get_all) and
/// [`iter`](Self::iter) lend borrows tied to the roster, so a handle can
/// never outlive the record it points at; [`delete`](Self::delete) moves the
/// record out by value.
pub struct Roster<K> {
    /// Node storage
    arena: Arena<K>,
    /// Insertion order over the arena nodes
    list: StudentList,
    /// Id lookup: StudentId -> ArenaIndex
    index: StudentIndex<K>,
}

impl<K: StudentId> Roster<K> {
    /// Create a new empty roster
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            list: StudentList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create a new roster with room for `students` records
    pub fn with_capacity(students: usize) -> Self {
        Self {
            arena: Arena::with_capacity(students),
            list: StudentList::new(),
            index: FxHashMap::with_capacity_and_hasher(students, Default::default()),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a student at the end of the roster.
    ///
    /// `grades` defaults to an empty map. Fails with `AlreadyExists`, leaving
    /// the roster untouched, if `id` is already present.
    pub fn add(
        &mut self,
        id: K,
        name: impl Into<String>,
        grades: Option<Grades>,
    ) -> Result<(), RosterError<K>> {
        if self.index.contains_key(&id) {
            return Err(RosterError::AlreadyExists(id));
        }

        let student = Student::new(id.clone(), name.into(), grades.unwrap_or_default());
        let arena_index = self.arena.alloc(student);
        self.list.push_back(&mut self.arena, arena_index);
        self.index.insert(id, arena_index);

        Ok(())
    }

    /// Remove a student and hand the record back.
    ///
    /// Existence is decided by the index; the list unlink is O(1) through the
    /// node's `prev`/`next` links wherever the node sits.
    pub fn delete(&mut self, id: &K) -> Result<Student<K>, RosterError<K>> {
        let arena_index = *self
            .index
            .get(id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;

        match self.arena.student(arena_index) {
            Some(student) if student.id() == id => {}
            _ => {
                return Err(RosterError::violation(
                    Some(id.clone()),
                    "index points at a foreign node",
                ))
            }
        }

        self.index.remove(id);
        self.list.remove(&mut self.arena, arena_index);
        self.arena
            .free(arena_index)
            .ok_or_else(|| RosterError::violation(Some(id.clone()), "node freed twice"))
    }

    /// Set `grades[course] = grade`, inserting or overwriting.
    pub fn update_grade(
        &mut self,
        id: &K,
        course: impl Into<String>,
        grade: impl Into<Grade>,
    ) -> Result<(), RosterError<K>> {
        let student = self
            .search_mut(id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;
        student.set_grade(course, grade);
        Ok(())
    }

    /// Append a course to the student's enrollments.
    pub fn enroll(&mut self, id: &K, course: impl Into<String>) -> Result<(), RosterError<K>> {
        let student = self
            .search_mut(id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;
        student.add_course(course);
        Ok(())
    }

    /// Drop a course from the student's enrollments. Unknown courses are ignored.
    pub fn drop_course(&mut self, id: &K, course: &str) -> Result<(), RosterError<K>> {
        let student = self
            .search_mut(id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;
        student.remove_course(course);
        Ok(())
    }

    /// Withdraw a student: notify each enrolled course, update financial aid,
    /// then delete.
    ///
    /// If the id is absent nothing runs and `NotFound` is returned.
    pub fn process_withdrawal<N, F>(
        &mut self,
        id: &K,
        notifier: &mut N,
        aid: &mut F,
    ) -> Result<Student<K>, RosterError<K>>
    where
        N: Notifier<K> + ?Sized,
        F: FinancialAid<K> + ?Sized,
    {
        let student = self
            .search(id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;

        for course in &student.courses {
            notifier.notify_withdrawal(student, course);
        }
        aid.update_financial_aid(student);

        self.delete(id).map_err(|err| match err {
            RosterError::NotFound(id) => {
                RosterError::violation(Some(id), "present before withdrawal, missing at delete")
            }
            other => other,
        })
    }

    /// Remove every student.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.list = StudentList::new();
        self.index.clear();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Look up a student through the index. Never scans the list.
    #[inline]
    pub fn search(&self, id: &K) -> Option<&Student<K>> {
        let arena_index = *self.index.get(id)?;
        self.arena.student(arena_index)
    }

    /// Look up a student for in-place editing.
    #[inline]
    pub fn search_mut(&mut self, id: &K) -> Option<&mut Student<K>> {
        let arena_index = *self.index.get(id)?;
        self.arena.student_mut(arena_index)
    }

    /// Check if a student exists.
    #[inline]
    pub fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    /// Every student in insertion order.
    pub fn get_all(&self) -> Vec<&Student<K>> {
        let mut students = Vec::with_capacity(self.len());
        students.extend(self.iter());
        students
    }

    /// Iterate students in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K> {
        self.list.iter(&self.arena)
    }

    /// GPA on the 4.0 scale, rounded to two places.
    ///
    /// Returns 0.0 for an unknown id or a student with no grades.
    pub fn calculate_gpa(&self, id: &K) -> f64 {
        self.search(id).map_or(0.0, |student| gpa::gpa(&student.grades))
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    /// Get the number of students
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the roster is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Walk the list and confirm it agrees with the index.
    ///
    /// Checks every linked node holds a record, that the record's id maps back
    /// to that node, that back links mirror forward links, and that the list,
    /// index and arena all count the same number of records.
    pub fn check_consistency(&self) -> Result<(), RosterError<K>> {
        let mut seen: FxHashSet<ArenaIndex> = FxHashSet::default();
        let mut prev = NULL_INDEX;

        for arena_index in self.list.indices(&self.arena) {
            let node = self.arena.get(arena_index);
            let student = node
                .student
                .as_ref()
                .ok_or_else(|| RosterError::violation(None, "list links a free node"))?;
            let id = student.id();

            if node.prev != prev {
                return Err(RosterError::violation(Some(id.clone()), "broken back link"));
            }
            if !seen.insert(arena_index) {
                return Err(RosterError::violation(Some(id.clone()), "list cycles"));
            }
            if self.index.get(id) != Some(&arena_index) {
                return Err(RosterError::violation(Some(id.clone()), "listed but not indexed"));
            }
            prev = arena_index;
        }

        if self.list.tail != prev {
            return Err(RosterError::violation(None, "tail is not the last node"));
        }

        if let Some((id, _)) = self.index.iter().find(|(_, idx)| !seen.contains(*idx)) {
            return Err(RosterError::violation(Some(id.clone()), "indexed but not listed"));
        }

        if seen.len() != self.list.count as usize || seen.len() != self.arena.allocated() as usize {
            return Err(RosterError::violation(None, "record counts differ"));
        }

        Ok(())
    }

    /// Approximate bytes held: every record plus the arena and index tables.
    pub fn memory_footprint(&self) -> usize {
        let records: usize = self.iter().map(Student::footprint).sum();
        // hashbrown keeps one control byte per bucket
        let index_entry = std::mem::size_of::<(K, ArenaIndex)>() + 1;

        records + self.arena.node_bytes() + self.index.capacity() * index_entry
    }

    /// Compute a hash of the roster in traversal order (for determinism testing).
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.len().hash(&mut hasher);
        for student in self.iter() {
            student.id().hash(&mut hasher);
            student.name.hash(&mut hasher);
            student.grades.len().hash(&mut hasher);
            for (course, grade) in &student.grades {
                course.hash(&mut hasher);
                match grade {
                    Grade::Score(score) => score.to_bits().hash(&mut hasher),
                    Grade::Letter(letter) => letter.hash(&mut hasher),
                }
            }
            student.courses.hash(&mut hasher);
        }

        hasher.finish()
    }
}

impl<K: StudentId> Default for Roster<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: StudentId> IntoIterator for &'a Roster<K> {
    type Item = &'a Student<K>;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> fmt::Debug for Roster<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roster")
            .field("len", &self.index.len())
            .field("head", &self.list.head)
            .field("tail", &self.list.tail)
            .field("arena", &self.arena)
            .finish()
    }
}
