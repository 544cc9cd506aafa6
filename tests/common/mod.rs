#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use secretary_backend::models::{DepartmentInput, MeetingInput, MeetingStatus, RoomInput};
use secretary_backend::{AppState, Stores};

pub fn memory_state() -> AppState {
    AppState::new(Stores::memory())
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn department(name: &str) -> DepartmentInput {
    DepartmentInput {
        name: name.to_string(),
        description: Some(format!("{} team", name)),
    }
}

pub fn room(name: &str, capacity: Option<i32>) -> RoomInput {
    RoomInput {
        name: name.to_string(),
        description: None,
        capacity,
        location: Some("Floor 2".to_string()),
    }
}

/// One-hour meeting starting at `start`.
pub fn meeting_at(start: NaiveDateTime) -> MeetingInput {
    MeetingInput {
        title: "Budget review".to_string(),
        description: None,
        start_time: start,
        end_time: start + chrono::Duration::hours(1),
        status: None,
        department: "Finance".to_string(),
        room: "Room A".to_string(),
        chairman: "Director".to_string(),
        secretary: "Assistant".to_string(),
    }
}

pub fn meeting_with(
    start: NaiveDateTime,
    status: MeetingStatus,
    department: &str,
    room: &str,
) -> MeetingInput {
    MeetingInput {
        status: Some(status),
        department: department.to_string(),
        room: room.to_string(),
        ..meeting_at(start)
    }
}
