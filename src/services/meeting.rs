use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use uuid::Uuid;

use crate::db::{MeetingFilter, MeetingGroupField, MeetingStore};
use crate::errors::{AppError, AppResult};
use crate::models::{Meeting, MeetingInput, MeetingStatistics, MeetingStatus, PeriodStatistics};
use crate::utils::period::TimeWindow;
use crate::utils::validation::validate_payload;

const RESOURCE: &str = "Meeting";

fn validate_time_range(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<()> {
    if end <= start {
        return Err(AppError::InvalidArgument(
            "end time must be after start time".to_string(),
        ));
    }
    Ok(())
}

fn validate_input(input: &MeetingInput) -> AppResult<()> {
    validate_payload(input)?;
    validate_time_range(input.start_time, input.end_time)
}

fn status_count(by_status: &BTreeMap<String, i64>, status: MeetingStatus) -> i64 {
    by_status.get(status.as_str()).copied().unwrap_or(0)
}

#[derive(Clone)]
pub struct MeetingService {
    store: Arc<dyn MeetingStore>,
}

impl MeetingService {
    pub fn new(store: Arc<dyn MeetingStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Meeting>> {
        self.store.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Meeting> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE, id))
    }

    /// Stores a new meeting; status defaults to `Scheduled` when absent.
    pub async fn create(&self, mut input: MeetingInput) -> AppResult<Meeting> {
        if let Err(err) = validate_input(&input) {
            warn!("Rejected meeting create '{}': {}", input.title, err);
            return Err(err);
        }
        input.status = Some(input.status.unwrap_or_default());

        let meeting = self.store.insert(input).await?;
        info!(
            "Created meeting {} ('{}', {})",
            meeting.id, meeting.title, meeting.status
        );
        Ok(meeting)
    }

    /// Replaces every mutable field. An input without a status keeps the
    /// stored one.
    pub async fn update(&self, id: Uuid, input: MeetingInput) -> AppResult<Meeting> {
        let mut meeting = self.get_by_id(id).await.map_err(|err| {
            warn!("Rejected meeting update: {}", err);
            err
        })?;
        if let Err(err) = validate_input(&input) {
            warn!("Rejected meeting update {}: {}", id, err);
            return Err(err);
        }

        meeting.apply(input);
        let meeting = self.store.update(meeting).await?;
        info!("Updated meeting {}", meeting.id);
        Ok(meeting)
    }

    pub async fn update_status(&self, id: Uuid, status: MeetingStatus) -> AppResult<Meeting> {
        let mut meeting = self.get_by_id(id).await.map_err(|err| {
            warn!("Rejected meeting status change to {}: {}", status, err);
            err
        })?;
        let previous = meeting.status;
        meeting.status = status;

        let meeting = self.store.update(meeting).await?;
        info!("Meeting {} status {} -> {}", meeting.id, previous, meeting.status);
        Ok(meeting)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_by_id(id).await? {
            let err = AppError::not_found(RESOURCE, id);
            warn!("Rejected meeting delete: {}", err);
            return Err(err);
        }
        info!("Deleted meeting {}", id);
        Ok(())
    }

    pub async fn list_by_status(&self, status: MeetingStatus) -> AppResult<Vec<Meeting>> {
        self.store
            .find_where(&MeetingFilter::new().status(status))
            .await
    }

    pub async fn list_by_department(&self, department: &str) -> AppResult<Vec<Meeting>> {
        self.store
            .find_where(&MeetingFilter::new().department(department))
            .await
    }

    pub async fn list_by_room(&self, room: &str) -> AppResult<Vec<Meeting>> {
        self.store
            .find_where(&MeetingFilter::new().room(room))
            .await
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<Meeting>> {
        self.list_within(TimeWindow::day(date)?).await
    }

    pub async fn list_by_month(&self, year: i32, month: u32) -> AppResult<Vec<Meeting>> {
        self.list_within(TimeWindow::month(year, month)?).await
    }

    pub async fn list_by_year(&self, year: i32) -> AppResult<Vec<Meeting>> {
        self.list_within(TimeWindow::year(year)?).await
    }

    async fn list_within(&self, window: TimeWindow) -> AppResult<Vec<Meeting>> {
        self.store
            .find_where(&MeetingFilter::new().starts_within(window))
            .await
    }

    /// Overall counts, calendar windows around `today`, and grouped counts.
    ///
    /// The per-status totals come from the same grouped query as `by_status`
    /// and `total_meetings` is their sum, so the partition always adds up.
    pub async fn statistics(&self, today: NaiveDate) -> AppResult<MeetingStatistics> {
        let by_status = self.store.group_count_by(MeetingGroupField::Status).await?;
        let by_department = self
            .store
            .group_count_by(MeetingGroupField::Department)
            .await?;
        let by_room = self.store.group_count_by(MeetingGroupField::Room).await?;

        let scheduled_meetings = status_count(&by_status, MeetingStatus::Scheduled);
        let ongoing_meetings = status_count(&by_status, MeetingStatus::Ongoing);
        let finished_meetings = status_count(&by_status, MeetingStatus::Finished);

        Ok(MeetingStatistics {
            total_meetings: scheduled_meetings + ongoing_meetings + finished_meetings,
            scheduled_meetings,
            ongoing_meetings,
            finished_meetings,
            meetings_today: self.count_within(TimeWindow::day(today)?).await?,
            meetings_this_week: self.count_within(TimeWindow::week_of(today)?).await?,
            meetings_this_month: self.count_within(TimeWindow::month_of(today)?).await?,
            meetings_this_year: self.count_within(TimeWindow::year_of(today)?).await?,
            by_department,
            by_room,
            by_status,
        })
    }

    pub async fn statistics_for_date(&self, date: NaiveDate) -> AppResult<PeriodStatistics> {
        self.period_statistics(TimeWindow::day(date)?).await
    }

    pub async fn statistics_for_month(&self, year: i32, month: u32) -> AppResult<PeriodStatistics> {
        self.period_statistics(TimeWindow::month(year, month)?).await
    }

    pub async fn statistics_for_year(&self, year: i32) -> AppResult<PeriodStatistics> {
        self.period_statistics(TimeWindow::year(year)?).await
    }

    async fn count_within(&self, window: TimeWindow) -> AppResult<i64> {
        self.store
            .count_where(&MeetingFilter::new().starts_within(window))
            .await
    }

    async fn period_statistics(&self, window: TimeWindow) -> AppResult<PeriodStatistics> {
        let mut stats = PeriodStatistics::default();
        for status in MeetingStatus::ALL {
            let filter = MeetingFilter::new().status(status).starts_within(window);
            let count = self.store.count_where(&filter).await?;
            match status {
                MeetingStatus::Scheduled => stats.scheduled = count,
                MeetingStatus::Ongoing => stats.ongoing = count,
                MeetingStatus::Finished => stats.finished = count,
            }
        }
        stats.total = stats.scheduled + stats.ongoing + stats.finished;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn time_range_is_strict() {
        assert!(validate_time_range(at(9), at(10)).is_ok());
        assert!(matches!(
            validate_time_range(at(9), at(9)),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            validate_time_range(at(10), at(9)),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_status_group_counts_as_zero() {
        let mut by_status = BTreeMap::new();
        by_status.insert("ONGOING".to_string(), 4);
        assert_eq!(status_count(&by_status, MeetingStatus::Ongoing), 4);
        assert_eq!(status_count(&by_status, MeetingStatus::Finished), 0);
    }
}
