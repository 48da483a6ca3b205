use serde::Serialize;
use std::collections::HashSet;

use super::records::TimetableEntry;

/// Distinct value counts over one loaded timetable.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct TimetableStats {
    pub entries: usize,
    pub cohorts: usize,
    /// Distinct (cohort, section) pairs.
    pub sections: usize,
    pub instructors: usize,
    pub courses: usize,
}

impl TimetableStats {
    pub fn from_entries(entries: &[TimetableEntry]) -> Self {
        let mut cohorts = HashSet::new();
        let mut sections = HashSet::new();
        let mut instructors = HashSet::new();
        let mut courses = HashSet::new();

        for entry in entries {
            cohorts.insert(entry.cohort.as_str());
            sections.insert((entry.cohort.as_str(), entry.section.as_str()));
            instructors.insert(entry.instructor.as_str());
            courses.insert(entry.course.as_str());
        }

        TimetableStats {
            entries: entries.len(),
            cohorts: cohorts.len(),
            sections: sections.len(),
            instructors: instructors.len(),
            courses: courses.len(),
        }
    }
}
