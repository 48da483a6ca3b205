use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::records::TimetableEntry;

/// A queryable, string-valued column of a timetable entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Field {
    Cohort,
    Section,
    Instructor,
    Time,
    Type,
    Session,
    Course,
    Classroom,
}

impl Field {
    pub fn value<'a>(&self, entry: &'a TimetableEntry) -> &'a str {
        match self {
            Field::Cohort => &entry.cohort,
            Field::Section => &entry.section,
            Field::Instructor => &entry.instructor,
            Field::Time => &entry.time_interval,
            Field::Type => &entry.session_type,
            Field::Session => &entry.session,
            Field::Course => &entry.course,
            Field::Classroom => &entry.classroom,
        }
    }
}

/// How `time_interval` is compared within a weekday.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeOrder {
    /// Plain string comparison. "9:00" sorts after "10:00".
    #[default]
    Lexical,
    /// Compare the start time of the interval as minutes past midnight.
    Chronological,
}

/// Equality predicate over one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Criterion {
    pub field: Field,
    pub value: String,
}

impl Criterion {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Criterion {
            field,
            value: value.into(),
        }
    }

    fn matches(&self, entry: &TimetableEntry) -> bool {
        self.field.value(entry) == self.value
    }
}

/// Sorted, de-duplicated values of `field` across `entries`, for selection lists.
pub fn build_filter_index(entries: &[TimetableEntry], field: Field) -> Vec<String> {
    entries
        .iter()
        .map(|entry| field.value(entry))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Entries matching every criterion, in their input order.
pub fn filter_entries(entries: &[TimetableEntry], criteria: &[Criterion]) -> Vec<TimetableEntry> {
    entries
        .par_iter()
        .filter(|entry| criteria.iter().all(|criterion| criterion.matches(entry)))
        .cloned()
        .collect()
}

/// Orders entries by weekday (unknown weekdays first), then by time. Stable.
pub fn sort_entries(entries: &[TimetableEntry], time_order: TimeOrder) -> Vec<TimetableEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        a.day_rank()
            .cmp(&b.day_rank())
            .then_with(|| compare_times(&a.time_interval, &b.time_interval, time_order))
    });
    sorted
}

/// Classes for one cohort and section, in display order.
pub fn student_view(
    entries: &[TimetableEntry],
    cohort: &str,
    section: &str,
    time_order: TimeOrder,
) -> Vec<TimetableEntry> {
    let criteria = [
        Criterion::new(Field::Cohort, cohort),
        Criterion::new(Field::Section, section),
    ];
    sort_entries(&filter_entries(entries, &criteria), time_order)
}

/// Assignments for one instructor, in display order.
pub fn instructor_view(
    entries: &[TimetableEntry],
    instructor: &str,
    time_order: TimeOrder,
) -> Vec<TimetableEntry> {
    let criteria = [Criterion::new(Field::Instructor, instructor)];
    sort_entries(&filter_entries(entries, &criteria), time_order)
}

fn compare_times(a: &str, b: &str, time_order: TimeOrder) -> Ordering {
    match time_order {
        TimeOrder::Lexical => a.cmp(b),
        TimeOrder::Chronological => match (start_minutes(a), start_minutes(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}

/// Start of an interval like "9:00-10:30" or "09:00 - 10:30" in minutes past midnight.
fn start_minutes(interval: &str) -> Option<u32> {
    let start = interval.split('-').next()?.trim();
    let (hours, minutes) = start.split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}
