use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::not_blank;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Ongoing,
    Finished,
}

#[derive(Debug, Error)]
#[error("unknown meeting status '{0}', expected SCHEDULED, ONGOING or FINISHED")]
pub struct ParseStatusError(pub String);

impl MeetingStatus {
    pub const ALL: [MeetingStatus; 3] = [
        MeetingStatus::Scheduled,
        MeetingStatus::Ongoing,
        MeetingStatus::Finished,
    ];

    /// Wire and storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "SCHEDULED",
            MeetingStatus::Ongoing => "ONGOING",
            MeetingStatus::Finished => "FINISHED",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "Scheduled",
            MeetingStatus::Ongoing => "Ongoing",
            MeetingStatus::Finished => "Finished",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(MeetingStatus::Scheduled),
            "ONGOING" => Ok(MeetingStatus::Ongoing),
            "FINISHED" => Ok(MeetingStatus::Finished),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl TryFrom<String> for MeetingStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[sqlx(try_from = "String")]
    pub status: MeetingStatus,
    pub department: String,
    pub room: String,
    pub chairman: String,
    pub secretary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable meeting fields as submitted on create and update.
///
/// `status` is optional: create defaults it to `Scheduled`, update keeps
/// whatever the stored meeting already has.
#[derive(Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInput {
    #[validate(custom = "not_blank")]
    pub title: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: Option<MeetingStatus>,
    #[validate(custom = "not_blank")]
    pub department: String,
    #[validate(custom = "not_blank")]
    pub room: String,
    #[validate(custom = "not_blank")]
    pub chairman: String,
    #[validate(custom = "not_blank")]
    pub secretary: String,
}

impl Meeting {
    /// Overwrites every mutable field; status only when the input carries one.
    pub fn apply(&mut self, input: MeetingInput) {
        self.title = input.title;
        self.description = input.description;
        self.start_time = input.start_time;
        self.end_time = input.end_time;
        self.department = input.department;
        self.room = input.room;
        self.chairman = input.chairman;
        self.secretary = input.secretary;
        if let Some(status) = input.status {
            self.status = status;
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingStatistics {
    pub total_meetings: i64,
    pub scheduled_meetings: i64,
    pub ongoing_meetings: i64,
    pub finished_meetings: i64,

    pub meetings_today: i64,
    pub meetings_this_week: i64,
    pub meetings_this_month: i64,
    pub meetings_this_year: i64,

    pub by_department: BTreeMap<String, i64>,
    pub by_room: BTreeMap<String, i64>,
    pub by_status: BTreeMap<String, i64>,
}

/// Status breakdown over a single date, month or year.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodStatistics {
    pub total: i64,
    pub scheduled: i64,
    pub ongoing: i64,
    pub finished: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_only_wire_names() {
        assert_eq!("ONGOING".parse::<MeetingStatus>().unwrap(), MeetingStatus::Ongoing);
        assert_eq!("FINISHED".parse::<MeetingStatus>().unwrap(), MeetingStatus::Finished);
        assert!("ongoing".parse::<MeetingStatus>().is_err());
        assert!("cancelled".parse::<MeetingStatus>().is_err());
    }

    #[test]
    fn json_and_text_agree_on_status_names() {
        for status in MeetingStatus::ALL {
            let from_json: MeetingStatus =
                serde_json::from_str(&format!("\"{}\"", status.as_str())).unwrap();
            assert_eq!(from_json, status.as_str().parse::<MeetingStatus>().unwrap());
        }
        assert!(serde_json::from_str::<MeetingStatus>("\"finished\"").is_err());
        assert!("finished".parse::<MeetingStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_storage_name() {
        for status in MeetingStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(MeetingStatus::default(), MeetingStatus::Scheduled);
    }

    #[test]
    fn period_statistics_has_exactly_four_keys() {
        let value = serde_json::to_value(PeriodStatistics::default()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        for key in ["total", "scheduled", "ongoing", "finished"] {
            assert!(keys.iter().any(|k| k == key));
        }
    }
}
