use actix_web::{web, HttpResponse};

use super::parse_id;
use crate::errors::AppError;
use crate::models::{ApiResponse, RoomInput};
use crate::services::AppState;

pub async fn get_rooms(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rooms = state.rooms.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(rooms)))
}

pub async fn get_room(
    state: web::Data<AppState>,
    room_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let room_id = parse_id(&room_id, "room")?;
    let room = state.rooms.get_by_id(room_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(room)))
}

pub async fn create_room(
    state: web::Data<AppState>,
    new_room: web::Json<RoomInput>,
) -> Result<HttpResponse, AppError> {
    let room = state.rooms.create(new_room.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        "Room created successfully",
        room,
    )))
}

pub async fn update_room(
    state: web::Data<AppState>,
    room_id: web::Path<String>,
    updates: web::Json<RoomInput>,
) -> Result<HttpResponse, AppError> {
    let room_id = parse_id(&room_id, "room")?;
    let room = state.rooms.update(room_id, updates.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "Room updated successfully",
        room,
    )))
}

pub async fn delete_room(
    state: web::Data<AppState>,
    room_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let room_id = parse_id(&room_id, "room")?;
    state.rooms.delete(room_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "Room deleted successfully",
        (),
    )))
}
