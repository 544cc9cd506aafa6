mod memory;
mod postgres;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::{AppConfig, StorageBackend};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Department, DepartmentInput, Meeting, MeetingInput, MeetingStatus, Room, RoomInput,
};
use crate::utils::period::TimeWindow;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Department>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>>;
    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>>;
    /// Persists a new record with a fresh id and timestamps.
    async fn insert(&self, input: DepartmentInput) -> AppResult<Department>;
    /// Overwrites the record with `department.id`, refreshing `updated_at`.
    async fn update(&self, department: Department) -> AppResult<Department>;
    /// Returns `false` when nothing had that id.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>>;
    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Room>>;
    async fn insert(&self, input: RoomInput) -> AppResult<Room>;
    async fn update(&self, room: Room) -> AppResult<Room>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// All meetings ordered by start time.
    async fn find_all(&self) -> AppResult<Vec<Meeting>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Meeting>>;
    /// Persists a new meeting; an absent status is stored as `Scheduled`.
    async fn insert(&self, input: MeetingInput) -> AppResult<Meeting>;
    async fn update(&self, meeting: Meeting) -> AppResult<Meeting>;
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;
    async fn count_where(&self, filter: &MeetingFilter) -> AppResult<i64>;
    /// Matching meetings ordered by start time.
    async fn find_where(&self, filter: &MeetingFilter) -> AppResult<Vec<Meeting>>;
    /// Counts keyed by the distinct values present; absent values get no key.
    async fn group_count_by(&self, field: MeetingGroupField) -> AppResult<BTreeMap<String, i64>>;
}

/// Conjunction of optional exact-match and start-time constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingFilter {
    pub status: Option<MeetingStatus>,
    pub department: Option<String>,
    pub room: Option<String>,
    pub starts_within: Option<TimeWindow>,
}

impl MeetingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: MeetingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn starts_within(mut self, window: TimeWindow) -> Self {
        self.starts_within = Some(window);
        self
    }

    pub fn matches(&self, meeting: &Meeting) -> bool {
        self.status.map_or(true, |s| meeting.status == s)
            && self.department.as_deref().map_or(true, |d| meeting.department == d)
            && self.room.as_deref().map_or(true, |r| meeting.room == r)
            && self
                .starts_within
                .map_or(true, |w| w.contains(meeting.start_time))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingGroupField {
    Department,
    Room,
    Status,
}

impl MeetingGroupField {
    pub fn column(self) -> &'static str {
        match self {
            MeetingGroupField::Department => "department",
            MeetingGroupField::Room => "room",
            MeetingGroupField::Status => "status",
        }
    }

    pub fn key_of(self, meeting: &Meeting) -> String {
        match self {
            MeetingGroupField::Department => meeting.department.clone(),
            MeetingGroupField::Room => meeting.room.clone(),
            MeetingGroupField::Status => meeting.status.as_str().to_string(),
        }
    }
}

/// Handles to the three tables, shared by the managers.
#[derive(Clone)]
pub struct Stores {
    pub departments: Arc<dyn DepartmentStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub meetings: Arc<dyn MeetingStore>,
}

impl Stores {
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            departments: store.clone(),
            rooms: store.clone(),
            meetings: store,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            departments: store.clone(),
            rooms: store.clone(),
            meetings: store,
        }
    }

    /// Builds the configured backend; Postgres is connected and migrated first.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        match config.storage {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::memory())
            }
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| AppError::Database("DATABASE_URL must be set".to_string()))?;
                let pool = create_pool(url, config.max_connections).await?;
                run_migrations(&pool).await?;
                Ok(Self::postgres(pool))
            }
        }
    }
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    info!("Connected to database (max_connections={})", max_connections);
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|err| AppError::Database(err.to_string()))?;
    info!("Database migrations applied");
    Ok(())
}
