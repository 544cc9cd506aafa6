use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{DepartmentStore, MeetingFilter, MeetingGroupField, MeetingStore, RoomStore};
use crate::errors::{AppError, AppResult};
use crate::models::{Department, DepartmentInput, Meeting, MeetingInput, Room, RoomInput};

#[derive(Default)]
struct Tables {
    departments: Vec<Department>,
    rooms: Vec<Room>,
    meetings: Vec<Meeting>,
}

/// Process-local store. Every operation holds one lock for its whole
/// duration, so each call is atomic with respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::Database("memory store lock poisoned".to_string()))
    }
}

fn sorted_by_start(mut meetings: Vec<Meeting>) -> Vec<Meeting> {
    meetings.sort_by_key(|m| m.start_time);
    meetings
}

#[async_trait]
impl DepartmentStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Department>> {
        Ok(self.lock()?.departments.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        Ok(self.lock()?.departments.iter().find(|d| d.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        Ok(self.lock()?.departments.iter().any(|d| d.name == name))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        Ok(self.lock()?.departments.iter().find(|d| d.name == name).cloned())
    }

    async fn insert(&self, input: DepartmentInput) -> AppResult<Department> {
        let mut tables = self.lock()?;
        if tables.departments.iter().any(|d| d.name == input.name) {
            return Err(AppError::duplicate_name("Department", &input.name));
        }
        let now = Utc::now();
        let department = Department {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        tables.departments.push(department.clone());
        Ok(department)
    }

    async fn update(&self, mut department: Department) -> AppResult<Department> {
        let mut tables = self.lock()?;
        if tables
            .departments
            .iter()
            .any(|d| d.name == department.name && d.id != department.id)
        {
            return Err(AppError::duplicate_name("Department", &department.name));
        }
        let slot = tables
            .departments
            .iter_mut()
            .find(|d| d.id == department.id)
            .ok_or_else(|| AppError::not_found("Department", department.id))?;
        department.created_at = slot.created_at;
        department.updated_at = Utc::now();
        *slot = department.clone();
        Ok(department)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.departments.len();
        tables.departments.retain(|d| d.id != id);
        Ok(tables.departments.len() != before)
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Room>> {
        Ok(self.lock()?.rooms.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.lock()?.rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        Ok(self.lock()?.rooms.iter().any(|r| r.name == name))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Room>> {
        Ok(self.lock()?.rooms.iter().find(|r| r.name == name).cloned())
    }

    async fn insert(&self, input: RoomInput) -> AppResult<Room> {
        let mut tables = self.lock()?;
        if tables.rooms.iter().any(|r| r.name == input.name) {
            return Err(AppError::duplicate_name("Room", &input.name));
        }
        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            capacity: input.capacity,
            location: input.location,
            created_at: now,
            updated_at: now,
        };
        tables.rooms.push(room.clone());
        Ok(room)
    }

    async fn update(&self, mut room: Room) -> AppResult<Room> {
        let mut tables = self.lock()?;
        if tables
            .rooms
            .iter()
            .any(|r| r.name == room.name && r.id != room.id)
        {
            return Err(AppError::duplicate_name("Room", &room.name));
        }
        let slot = tables
            .rooms
            .iter_mut()
            .find(|r| r.id == room.id)
            .ok_or_else(|| AppError::not_found("Room", room.id))?;
        room.created_at = slot.created_at;
        room.updated_at = Utc::now();
        *slot = room.clone();
        Ok(room)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.rooms.len();
        tables.rooms.retain(|r| r.id != id);
        Ok(tables.rooms.len() != before)
    }
}

#[async_trait]
impl MeetingStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Meeting>> {
        Ok(sorted_by_start(self.lock()?.meetings.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Meeting>> {
        Ok(self.lock()?.meetings.iter().find(|m| m.id == id).cloned())
    }

    async fn insert(&self, input: MeetingInput) -> AppResult<Meeting> {
        let now = Utc::now();
        let meeting = Meeting {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            start_time: input.start_time,
            end_time: input.end_time,
            status: input.status.unwrap_or_default(),
            department: input.department,
            room: input.room,
            chairman: input.chairman,
            secretary: input.secretary,
            created_at: now,
            updated_at: now,
        };
        self.lock()?.meetings.push(meeting.clone());
        Ok(meeting)
    }

    async fn update(&self, mut meeting: Meeting) -> AppResult<Meeting> {
        let mut tables = self.lock()?;
        let slot = tables
            .meetings
            .iter_mut()
            .find(|m| m.id == meeting.id)
            .ok_or_else(|| AppError::not_found("Meeting", meeting.id))?;
        meeting.created_at = slot.created_at;
        meeting.updated_at = Utc::now();
        *slot = meeting.clone();
        Ok(meeting)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.meetings.len();
        tables.meetings.retain(|m| m.id != id);
        Ok(tables.meetings.len() != before)
    }

    async fn count_where(&self, filter: &MeetingFilter) -> AppResult<i64> {
        let count = self
            .lock()?
            .meetings
            .iter()
            .filter(|m| filter.matches(m))
            .count();
        Ok(count as i64)
    }

    async fn find_where(&self, filter: &MeetingFilter) -> AppResult<Vec<Meeting>> {
        let matched = self
            .lock()?
            .meetings
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        Ok(sorted_by_start(matched))
    }

    async fn group_count_by(&self, field: MeetingGroupField) -> AppResult<BTreeMap<String, i64>> {
        let mut counts = BTreeMap::new();
        for meeting in self.lock()?.meetings.iter() {
            *counts.entry(field.key_of(meeting)).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
