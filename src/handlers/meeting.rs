use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::Deserialize;

use super::{parse_date, parse_id};
use crate::errors::AppError;
use crate::models::{ApiResponse, MeetingInput, MeetingStatus};
use crate::services::AppState;

#[derive(Deserialize)]
pub struct StatusQuery {
    status: String,
}

fn parse_status(raw: &str) -> Result<MeetingStatus, AppError> {
    raw.parse::<MeetingStatus>()
        .map_err(|err| AppError::InvalidArgument(err.to_string()))
}

pub async fn get_meetings(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let meetings = state.meetings.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_meeting(
    state: web::Data<AppState>,
    meeting_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = parse_id(&meeting_id, "meeting")?;
    let meeting = state.meetings.get_by_id(meeting_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meeting)))
}

pub async fn create_meeting(
    state: web::Data<AppState>,
    new_meeting: web::Json<MeetingInput>,
) -> Result<HttpResponse, AppError> {
    let meeting = state.meetings.create(new_meeting.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        "Meeting created successfully",
        meeting,
    )))
}

pub async fn update_meeting(
    state: web::Data<AppState>,
    meeting_id: web::Path<String>,
    updates: web::Json<MeetingInput>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = parse_id(&meeting_id, "meeting")?;
    let meeting = state
        .meetings
        .update(meeting_id, updates.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "Meeting updated successfully",
        meeting,
    )))
}

pub async fn update_meeting_status(
    state: web::Data<AppState>,
    meeting_id: web::Path<String>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = parse_id(&meeting_id, "meeting")?;
    let status = parse_status(&query.status)?;
    let meeting = state.meetings.update_status(meeting_id, status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        format!("Meeting status changed to {}", status.display_name()),
        meeting,
    )))
}

pub async fn delete_meeting(
    state: web::Data<AppState>,
    meeting_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meeting_id = parse_id(&meeting_id, "meeting")?;
    state.meetings.delete(meeting_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "Meeting deleted successfully",
        (),
    )))
}

pub async fn get_meetings_by_status(
    state: web::Data<AppState>,
    status: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let status = parse_status(&status)?;
    let meetings = state.meetings.list_by_status(status).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_meetings_by_department(
    state: web::Data<AppState>,
    department: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meetings = state.meetings.list_by_department(&department).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_meetings_by_room(
    state: web::Data<AppState>,
    room: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meetings = state.meetings.list_by_room(&room).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_meetings_by_date(
    state: web::Data<AppState>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let date = parse_date(&date)?;
    let meetings = state.meetings.list_by_date(date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_meetings_by_month(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32)>,
) -> Result<HttpResponse, AppError> {
    let (year, month) = path.into_inner();
    let meetings = state.meetings.list_by_month(year, month).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_meetings_by_year(
    state: web::Data<AppState>,
    year: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let meetings = state.meetings.list_by_year(year.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meetings)))
}

pub async fn get_statistics(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let statistics = state.meetings.statistics(today).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(statistics)))
}

pub async fn get_statistics_by_date(
    state: web::Data<AppState>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let date = parse_date(&date)?;
    let statistics = state.meetings.statistics_for_date(date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(statistics)))
}

pub async fn get_statistics_by_month(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32)>,
) -> Result<HttpResponse, AppError> {
    let (year, month) = path.into_inner();
    let statistics = state.meetings.statistics_for_month(year, month).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(statistics)))
}

pub async fn get_statistics_by_year(
    state: web::Data<AppState>,
    year: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let statistics = state.meetings.statistics_for_year(year.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(statistics)))
}
