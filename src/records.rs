use serde::Serialize;
use std::str::FromStr;

/// Sentinel used for a missing section or classroom.
pub const NOT_APPLICABLE: &str = "N/A";

/// One scheduled class session as shown in the student and instructor views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimetableEntry {
    pub cohort: String,
    pub section: String,
    pub instructor: String,
    pub time_interval: String,
    #[serde(rename = "type")]
    pub session_type: String,
    pub session: String,
    pub course: String,
    pub classroom: String,
}

impl TimetableEntry {
    /// The weekday this entry falls on, if `session` is one of the canonical names.
    pub fn day(&self) -> Option<Day> {
        Day::from_str(&self.session).ok()
    }

    /// Weekday rank used for ordering. Non-canonical session names rank 0.
    pub fn day_rank(&self) -> u8 {
        self.day().map(|day| day.rank()).unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday is 1 through Sunday 7.
    pub fn rank(&self) -> u8 {
        match self {
            Day::Monday => 1,
            Day::Tuesday => 2,
            Day::Wednesday => 3,
            Day::Thursday => 4,
            Day::Friday => 5,
            Day::Saturday => 6,
            Day::Sunday => 7,
        }
    }
}

// Case-exact: "monday" is not a canonical weekday in the timetable export.
impl FromStr for Day {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Day::Monday),
            "Tuesday" => Ok(Day::Tuesday),
            "Wednesday" => Ok(Day::Wednesday),
            "Thursday" => Ok(Day::Thursday),
            "Friday" => Ok(Day::Friday),
            "Saturday" => Ok(Day::Saturday),
            "Sunday" => Ok(Day::Sunday),
            _ => Err(()),
        }
    }
}
