use indicatif::ProgressIterator;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::group_key;
use super::records::{Day, NOT_APPLICABLE, TimetableEntry};
use super::utils::progress_bar_for_count;

const DEFAULT_INSTRUCTOR: &str = "Unknown";
const DEFAULT_COURSE: &str = "Unknown";
const DEFAULT_TYPE: &str = "Lecture";
const DEFAULT_TIME: &str = "";

/// Outcome of flattening one raw timetable document.
#[derive(Debug)]
pub struct Ingested {
    /// Top-level label of the document, e.g. `Term_1_AY_2025/2026_Timetable`.
    pub root_label: Option<String>,
    pub entries: Vec<TimetableEntry>,
    pub status: IngestStatus,
    pub issues: Vec<IngestIssue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestStatus {
    Loaded,
    /// The document was well formed but held no groups.
    Empty,
    /// The document did not have the expected shape; no entries were kept.
    Malformed { path: String, reason: String },
}

impl IngestStatus {
    pub fn is_malformed(&self) -> bool {
        matches!(self, IngestStatus::Malformed { .. })
    }
}

impl fmt::Display for IngestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestStatus::Loaded => f.write_str("loaded"),
            IngestStatus::Empty => f.write_str("empty"),
            IngestStatus::Malformed { path, reason } => write!(f, "malformed at {path}: {reason}"),
        }
    }
}

/// Something the normalizer had to paper over while still keeping the entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestIssue {
    DefaultedField {
        path: String,
        field: &'static str,
        default: &'static str,
    },
    UnknownWeekday {
        path: String,
    },
}

impl fmt::Display for IngestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestIssue::DefaultedField {
                path,
                field,
                default,
            } => write!(f, "{path}: missing {field}, using {default:?}"),
            IngestIssue::UnknownWeekday { path } => {
                write!(f, "{path}: not a canonical weekday, sorted first")
            }
        }
    }
}

struct Malformed {
    path: String,
    reason: String,
}

/// Flattens `{ root: { group: { weekday: { session_id: session } } } }` into
/// entries, in document order.
///
/// Never fails: a document of the wrong shape gives an empty collection with
/// an `IngestStatus::Malformed` status and a logged warning.
pub fn flatten(document: &Value) -> Ingested {
    let mut issues = Vec::new();
    match flatten_root(document, &mut issues) {
        Ok((root_label, entries)) => {
            for issue in issues.iter() {
                tracing::debug!(%issue, "normalized timetable session");
            }
            if !issues.is_empty() {
                tracing::warn!(
                    issues = issues.len(),
                    "timetable sessions needed defaults or have unknown weekdays"
                );
            }
            let status = if entries.is_empty() {
                IngestStatus::Empty
            } else {
                IngestStatus::Loaded
            };
            Ingested {
                root_label: Some(root_label),
                entries,
                status,
                issues,
            }
        }
        Err(Malformed { path, reason }) => {
            tracing::warn!(%path, %reason, "timetable document is malformed; no entries loaded");
            Ingested {
                root_label: None,
                entries: Vec::new(),
                status: IngestStatus::Malformed { path, reason },
                issues: Vec::new(),
            }
        }
    }
}

fn flatten_root(
    document: &Value,
    issues: &mut Vec<IngestIssue>,
) -> Result<(String, Vec<TimetableEntry>), Malformed> {
    let top = as_object(document, "$", "document")?;
    // Only the first root label is used, later ones are ignored.
    let Some((root_label, groups)) = top.iter().next() else {
        return Err(Malformed {
            path: "$".to_string(),
            reason: "document has no root label".to_string(),
        });
    };
    let groups = as_object(groups, root_label, "group mapping")?;

    let mut entries = Vec::new();
    let progress = progress_bar_for_count(groups.len());
    for (key, weekdays) in groups.iter().progress_with(progress) {
        let group_path = format!("{root_label}/{key}");
        if key.is_empty() {
            return Err(Malformed {
                path: group_path,
                reason: "empty group key".to_string(),
            });
        }
        let group = group_key::parse(key);
        let weekdays = as_object(weekdays, &group_path, "weekday mapping")?;

        for (weekday, sessions) in weekdays.iter() {
            let day_path = format!("{group_path}/{weekday}");
            if weekday.is_empty() {
                return Err(Malformed {
                    path: day_path,
                    reason: "empty weekday key".to_string(),
                });
            }
            if Day::from_str(weekday).is_err() {
                issues.push(IngestIssue::UnknownWeekday {
                    path: day_path.clone(),
                });
            }
            let sessions = as_object(sessions, &day_path, "session mapping")?;

            for (session_id, session) in sessions.iter() {
                let session_path = format!("{day_path}/{session_id}");
                let session = as_object(session, &session_path, "session")?;
                let mut field = |name: &'static str, default: &'static str| {
                    text_field(session, name, default, &session_path, issues)
                };
                entries.push(TimetableEntry {
                    cohort: group.cohort.clone(),
                    section: group.section.clone(),
                    instructor: field("Instructor", DEFAULT_INSTRUCTOR),
                    time_interval: field("Time", DEFAULT_TIME),
                    session_type: field("Type", DEFAULT_TYPE),
                    session: weekday.clone(),
                    course: field("Course", DEFAULT_COURSE),
                    classroom: classroom(session),
                });
            }
        }
    }

    Ok((root_label.clone(), entries))
}

fn as_object<'a>(
    value: &'a Value,
    path: &str,
    expected: &str,
) -> Result<&'a Map<String, Value>, Malformed> {
    value.as_object().ok_or_else(|| Malformed {
        path: path.to_string(),
        reason: format!("expected {expected} object, found {}", kind(value)),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn text_field(
    session: &Map<String, Value>,
    name: &'static str,
    default: &'static str,
    path: &str,
    issues: &mut Vec<IngestIssue>,
) -> String {
    match session.get(name) {
        // Course must never be empty, the other fields are copied as given.
        Some(Value::String(value)) if !(name == "Course" && value.is_empty()) => value.clone(),
        _ => {
            issues.push(IngestIssue::DefaultedField {
                path: path.to_string(),
                field: name,
                default,
            });
            default.to_string()
        }
    }
}

// Classroom is optional in the export, so a missing one is not an issue.
fn classroom(session: &Map<String, Value>) -> String {
    match session.get("Classroom") {
        Some(Value::String(room)) if !room.is_empty() => room.clone(),
        _ => NOT_APPLICABLE.to_string(),
    }
}
