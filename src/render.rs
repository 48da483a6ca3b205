use anyhow::Result;

use super::records::TimetableEntry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Json,
}

/// Which columns a view shows, and what it says when nothing matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Student,
    Instructor,
}

impl View {
    fn headers(&self) -> [&'static str; 6] {
        match self {
            View::Student => ["Session", "Time", "Course", "Classroom", "Type", "Instructor"],
            View::Instructor => ["Day", "Time", "Course", "Classroom", "Cohort", "Section"],
        }
    }

    fn row<'a>(&self, entry: &'a TimetableEntry) -> [&'a str; 6] {
        match self {
            View::Student => [
                entry.session.as_str(),
                entry.time_interval.as_str(),
                entry.course.as_str(),
                entry.classroom.as_str(),
                entry.session_type.as_str(),
                entry.instructor.as_str(),
            ],
            View::Instructor => [
                entry.session.as_str(),
                entry.time_interval.as_str(),
                entry.course.as_str(),
                entry.classroom.as_str(),
                entry.cohort.as_str(),
                entry.section.as_str(),
            ],
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            View::Student => "No classes found for the selected criteria.",
            View::Instructor => "No assignments found for this instructor.",
        }
    }
}

pub fn render(entries: &[TimetableEntry], view: View, format: Format) -> Result<String> {
    match format {
        Format::Table => Ok(table(entries, view)),
        Format::Json => Ok(format!("{}\n", serde_json::to_string_pretty(entries)?)),
    }
}

/// Left-aligned, pipe-separated table with one header row.
pub fn table(entries: &[TimetableEntry], view: View) -> String {
    if entries.is_empty() {
        return format!("{}\n", view.empty_message());
    }

    let headers = view.headers();
    let rows: Vec<[&str; 6]> = entries.iter().map(|entry| view.row(entry)).collect();
    let mut widths = headers.map(|header| header.chars().count());
    for row in rows.iter() {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in rows.iter() {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> TimetableEntry {
        TimetableEntry {
            cohort: "BAPM 2023".to_string(),
            section: "A".to_string(),
            instructor: "Dr. X".to_string(),
            time_interval: "09:00-10:00".to_string(),
            session_type: "Lecture".to_string(),
            session: "Monday".to_string(),
            course: "CS101".to_string(),
            classroom: "N/A".to_string(),
        }
    }

    #[test]
    fn test_student_table() {
        let out = table(&[entry()], View::Student);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Session | Time        | Course | Classroom | Type    | Instructor",
                "--------+-------------+--------+-----------+---------+-----------",
                "Monday  | 09:00-10:00 | CS101  | N/A       | Lecture | Dr. X",
            ]
        );
    }

    #[test]
    fn test_instructor_table_shows_cohort_and_section() {
        let out = table(&[entry()], View::Instructor);
        assert!(out.starts_with("Day    | Time        | Course | Classroom | Cohort    | Section\n"));
        assert!(out.ends_with("Monday | 09:00-10:00 | CS101  | N/A       | BAPM 2023 | A\n"));
    }

    #[test]
    fn test_empty_views() {
        assert_eq!(
            table(&[], View::Student),
            "No classes found for the selected criteria.\n"
        );
        assert_eq!(
            table(&[], View::Instructor),
            "No assignments found for this instructor.\n"
        );
    }

    #[test]
    fn test_json_output() {
        let out = render(&[entry()], View::Student, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["cohort"], "BAPM 2023");
        assert_eq!(value[0]["type"], "Lecture");
        assert_eq!(render(&[], View::Student, Format::Json).unwrap(), "[]\n");
    }
}
