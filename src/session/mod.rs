pub mod builder;

pub use builder::{default_batches, expand_batches, CourseBatch, DEFAULT_BATCH_CREDITS};

use log::debug;
use thiserror::Error;

use crate::cgpa::{compute_with, BundleEntry, ComputationResult, CourseEntry};
use crate::scheme::SchemeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no course at position {index} (list has {len} courses)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Which field of a course row to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Credit,
    Grade,
}

/// The in-progress course list for one user.
///
/// Switching schemes leaves entries as they are; grades the new scheme does
/// not know are simply excluded at compute time.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    scheme: SchemeId,
    courses: Vec<CourseEntry>,
    bundle: Option<BundleEntry>,
}

impl Session {
    pub fn new(scheme: SchemeId) -> Self {
        Self {
            scheme,
            courses: Vec::new(),
            bundle: None,
        }
    }

    pub fn scheme(&self) -> SchemeId {
        self.scheme
    }

    pub fn courses(&self) -> &[CourseEntry] {
        &self.courses
    }

    pub fn bundle(&self) -> Option<&BundleEntry> {
        self.bundle.as_ref()
    }

    /// Switch scheme and return its grade labels for a picker.
    pub fn select_scheme(&mut self, scheme: SchemeId) -> Vec<&'static str> {
        debug!("Scheme {} -> {}", self.scheme, scheme);
        self.scheme = scheme;
        crate::scheme::list_grades(scheme)
    }

    /// Replace the course list with rows expanded from batches.
    pub fn initialize(&mut self, batches: &[CourseBatch]) {
        self.courses = expand_batches(batches, self.scheme);
        debug!("Initialized {} courses from {} batches", self.courses.len(), batches.len());
    }

    /// Append a row with blank credit and the scheme's default grade.
    pub fn add_course(&mut self) -> usize {
        let grade = self.scheme.scheme().default_grade();
        self.push_course(CourseEntry::new("", grade))
    }

    /// Append a row; returns the new list length.
    pub fn push_course(&mut self, entry: CourseEntry) -> usize {
        self.courses.push(entry);
        self.courses.len()
    }

    /// Remove the row at a 0-based index.
    pub fn remove_course(&mut self, index: usize) -> Result<CourseEntry, SessionError> {
        self.check_index(index)?;
        Ok(self.courses.remove(index))
    }

    pub fn update_course(
        &mut self,
        index: usize,
        field: CourseField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.check_index(index)?;
        let entry = &mut self.courses[index];
        match field {
            CourseField::Credit => entry.credit = value.into(),
            CourseField::Grade => entry.grade = value.into(),
        }
        Ok(())
    }

    pub fn set_bundle(&mut self, bundle: BundleEntry) {
        self.bundle = Some(bundle);
    }

    pub fn clear_bundle(&mut self) {
        self.bundle = None;
    }

    pub fn compute(&self) -> ComputationResult {
        compute_with(self.scheme, &self.courses, self.bundle.as_ref())
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.courses.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index: index.wrapping_add(1),
                len: self.courses.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(SchemeId::Nwu);
        assert!(session.courses().is_empty());
        assert!(session.bundle().is_none());
        assert_eq!(session.compute().cgpa, 0.0);
    }

    #[test]
    fn test_add_course_uses_default_grade() {
        let mut session = Session::new(SchemeId::Public);
        assert_eq!(session.add_course(), 1);
        assert_eq!(session.courses()[0], CourseEntry::new("", "A+"));
    }

    #[test]
    fn test_update_and_compute() {
        let mut session = Session::new(SchemeId::Nwu);
        session.add_course();
        session.add_course();
        session.update_course(0, CourseField::Credit, "3").unwrap();
        session.update_course(0, CourseField::Grade, "A").unwrap();
        session.update_course(1, CourseField::Credit, "1.5").unwrap();
        session.update_course(1, CourseField::Grade, "B+").unwrap();
        assert_eq!(session.compute().cgpa, 3.67);
    }

    #[test]
    fn test_remove_course() {
        let mut session = Session::new(SchemeId::Us);
        session.push_course(CourseEntry::new("3", "A"));
        session.push_course(CourseEntry::new("3", "F"));
        let removed = session.remove_course(1).unwrap();
        assert_eq!(removed.grade, "F");
        assert_eq!(session.compute().cgpa, 4.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut session = Session::new(SchemeId::Us);
        session.add_course();
        assert_eq!(
            session.remove_course(3),
            Err(SessionError::IndexOutOfRange { index: 4, len: 1 })
        );
        assert!(session.update_course(1, CourseField::Grade, "A").is_err());
    }

    #[test]
    fn test_select_scheme_keeps_entries() {
        let mut session = Session::new(SchemeId::Nwu);
        session.push_course(CourseEntry::new("3", "A+"));
        session.push_course(CourseEntry::new("3", "B"));

        let grades = session.select_scheme(SchemeId::Us);
        assert_eq!(grades[0], "A");
        assert_eq!(session.courses()[0], CourseEntry::new("3", "A+"));

        let result = session.compute();
        assert_eq!(result.scheme, SchemeId::Us);
        assert_eq!(result.total_credits, 3.0);
        assert_eq!(result.cgpa, 3.0);
    }

    #[test]
    fn test_initialize_replaces_courses() {
        let mut session = Session::new(SchemeId::BracNsu);
        session.push_course(CourseEntry::new("9", "F"));
        session.initialize(&[CourseBatch::new("2", "3"), CourseBatch::new("1", "1.5")]);
        assert_eq!(session.courses().len(), 3);
        // all default grade A at 4.0
        assert_eq!(session.compute().cgpa, 4.0);
    }

    #[test]
    fn test_bundle_set_and_clear() {
        let mut session = Session::new(SchemeId::Public);
        session.set_bundle(BundleEntry::new("30", "A-"));
        assert_eq!(session.compute().cgpa, 3.5);
        session.clear_bundle();
        assert_eq!(session.compute().cgpa, 0.0);
    }
}
