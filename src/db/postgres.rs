use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{DepartmentStore, MeetingFilter, MeetingGroupField, MeetingStore, RoomStore};
use crate::errors::{AppError, AppResult};
use crate::models::{Department, DepartmentInput, Meeting, MeetingInput, Room, RoomInput};

const MEETING_COLUMNS: &str = "id, title, description, start_time, end_time, status, \
     department, room, chairman, secretary, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_meeting_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &MeetingFilter) {
    let mut separator = " WHERE ";
    if let Some(status) = filter.status {
        builder.push(separator).push("status = ").push_bind(status.as_str());
        separator = " AND ";
    }
    if let Some(department) = &filter.department {
        builder
            .push(separator)
            .push("department = ")
            .push_bind(department.clone());
        separator = " AND ";
    }
    if let Some(room) = &filter.room {
        builder.push(separator).push("room = ").push_bind(room.clone());
        separator = " AND ";
    }
    if let Some(window) = filter.starts_within {
        builder
            .push(separator)
            .push("start_time >= ")
            .push_bind(window.start)
            .push(" AND start_time < ")
            .push_bind(window.end);
    }
}

#[async_trait]
impl DepartmentStore for PgStore {
    async fn find_all(&self) -> AppResult<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM departments ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        let department = sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(department)
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM departments WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let department =
            sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(department)
    }

    async fn insert(&self, input: DepartmentInput) -> AppResult<Department> {
        let now = Utc::now();
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (id, name, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(department)
    }

    async fn update(&self, department: Department) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET name = $1, description = $2, updated_at = $3 \
             WHERE id = $4 RETURNING *",
        )
        .bind(&department.name)
        .bind(&department.description)
        .bind(Utc::now())
        .bind(department.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Department", department.id))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RoomStore for PgStore {
    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rooms WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn insert(&self, input: RoomInput) -> AppResult<Room> {
        let now = Utc::now();
        let room = sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, name, description, capacity, location, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.capacity)
        .bind(&input.location)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(room)
    }

    async fn update(&self, room: Room) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET name = $1, description = $2, capacity = $3, location = $4, \
             updated_at = $5 WHERE id = $6 RETURNING *",
        )
        .bind(&room.name)
        .bind(&room.description)
        .bind(room.capacity)
        .bind(&room.location)
        .bind(Utc::now())
        .bind(room.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Room", room.id))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MeetingStore for PgStore {
    async fn find_all(&self) -> AppResult<Vec<Meeting>> {
        self.find_where(&MeetingFilter::default()).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Meeting>> {
        let sql = format!("SELECT {} FROM meetings WHERE id = $1", MEETING_COLUMNS);
        let meeting = sqlx::query_as::<_, Meeting>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(meeting)
    }

    async fn insert(&self, input: MeetingInput) -> AppResult<Meeting> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO meetings ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {}",
            MEETING_COLUMNS, MEETING_COLUMNS
        );
        let meeting = sqlx::query_as::<_, Meeting>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.status.unwrap_or_default().as_str())
            .bind(&input.department)
            .bind(&input.room)
            .bind(&input.chairman)
            .bind(&input.secretary)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(meeting)
    }

    async fn update(&self, meeting: Meeting) -> AppResult<Meeting> {
        let sql = format!(
            "UPDATE meetings SET title = $1, description = $2, start_time = $3, end_time = $4, \
             status = $5, department = $6, room = $7, chairman = $8, secretary = $9, \
             updated_at = $10 WHERE id = $11 RETURNING {}",
            MEETING_COLUMNS
        );
        sqlx::query_as::<_, Meeting>(&sql)
            .bind(&meeting.title)
            .bind(&meeting.description)
            .bind(meeting.start_time)
            .bind(meeting.end_time)
            .bind(meeting.status.as_str())
            .bind(&meeting.department)
            .bind(&meeting.room)
            .bind(&meeting.chairman)
            .bind(&meeting.secretary)
            .bind(Utc::now())
            .bind(meeting.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Meeting", meeting.id))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_where(&self, filter: &MeetingFilter) -> AppResult<i64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM meetings");
        push_meeting_filter(&mut builder, filter);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_where(&self, filter: &MeetingFilter) -> AppResult<Vec<Meeting>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM meetings", MEETING_COLUMNS));
        push_meeting_filter(&mut builder, filter);
        builder.push(" ORDER BY start_time ASC");
        let meetings = builder
            .build_query_as::<Meeting>()
            .fetch_all(&self.pool)
            .await?;
        Ok(meetings)
    }

    async fn group_count_by(&self, field: MeetingGroupField) -> AppResult<BTreeMap<String, i64>> {
        let column = field.column();
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM meetings GROUP BY {column}",
            column = column
        );
        let rows = sqlx::query_as::<_, (String, i64)>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::MeetingStatus;
    use crate::utils::period::TimeWindow;

    #[test]
    fn filter_renders_half_open_window() {
        let window = TimeWindow::month(2024, 3).unwrap();
        let filter = MeetingFilter::new()
            .status(MeetingStatus::Finished)
            .room("A1")
            .starts_within(window);
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM meetings");
        push_meeting_filter(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM meetings WHERE status = $1 AND room = $2 \
             AND start_time >= $3 AND start_time < $4"
        );
    }

    #[test]
    fn empty_filter_adds_no_where_clause() {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT 1 FROM meetings");
        push_meeting_filter(&mut builder, &MeetingFilter::default());
        assert_eq!(builder.sql(), "SELECT 1 FROM meetings");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn meeting_window_queries_against_postgres() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url, 2).await.expect("pool");
        crate::db::run_migrations(&pool).await.expect("migrations");
        let store = PgStore::new(pool);

        let start = NaiveDate::from_ymd_opt(2031, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let meeting = MeetingStore::insert(
            &store,
            MeetingInput {
                title: "Boundary".to_string(),
                description: None,
                start_time: start,
                end_time: start + chrono::Duration::hours(1),
                status: None,
                department: "Ops".to_string(),
                room: "B2".to_string(),
                chairman: "Chair".to_string(),
                secretary: "Clerk".to_string(),
            },
        )
        .await
        .expect("insert");
        assert_eq!(meeting.status, MeetingStatus::Scheduled);

        let march = MeetingFilter::new()
            .room("B2")
            .starts_within(TimeWindow::month(2031, 3).unwrap());
        let february = MeetingFilter::new()
            .room("B2")
            .starts_within(TimeWindow::month(2031, 2).unwrap());
        assert!(store.count_where(&march).await.unwrap() >= 1);
        assert_eq!(store.count_where(&february).await.unwrap(), 0);

        assert!(MeetingStore::delete_by_id(&store, meeting.id).await.unwrap());
    }
}
