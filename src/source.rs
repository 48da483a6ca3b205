use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use super::normalize::{self, IngestStatus, Ingested};
use super::stats::TimetableStats;

/// Reads and decodes the raw timetable export.
///
/// An unreadable file or invalid JSON is an error. Valid JSON of the wrong
/// shape is not, it comes back from `load` as `IngestStatus::Malformed`.
pub fn read_document(path: &Path) -> Result<Value> {
    let text = fs_err::read_to_string(path)?;
    serde_json::from_str(&text)
        .with_context(|| format!("decode timetable document {}", path.display()))
}

/// Reads a timetable export and flattens it into entries.
pub fn load(path: &Path) -> Result<Ingested> {
    tracing::info!(path = %path.display(), "loading timetable");
    let document = read_document(path)?;
    let ingested = normalize::flatten(&document);

    match &ingested.status {
        IngestStatus::Loaded => {
            let stats = TimetableStats::from_entries(&ingested.entries);
            tracing::info!(
                root = ingested.root_label.as_deref().unwrap_or_default(),
                entries = stats.entries,
                cohorts = stats.cohorts,
                sections = stats.sections,
                instructors = stats.instructors,
                courses = stats.courses,
                "timetable loaded"
            );
        }
        IngestStatus::Empty => tracing::info!("timetable has no classes"),
        IngestStatus::Malformed { .. } => {}
    }
    Ok(ingested)
}
