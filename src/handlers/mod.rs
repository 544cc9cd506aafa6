pub mod department;
pub mod meeting;
pub mod room;

use actix_web::{error, web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

pub(crate) fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidArgument(format!("Invalid {} ID", resource)))
}

pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidArgument(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidArgument(err.to_string()).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidArgument(err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidArgument(err.to_string()).into()
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Registers every `/api` route. Expects `web::Data<AppState>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                .service(web::resource("/health").route(web::get().to(health)))
                .service(
                    web::scope("/departments")
                        .service(
                            web::resource("")
                                .route(web::get().to(department::get_departments))
                                .route(web::post().to(department::create_department)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(department::get_department))
                                .route(web::put().to(department::update_department))
                                .route(web::delete().to(department::delete_department)),
                        ),
                )
                .service(
                    web::scope("/rooms")
                        .service(
                            web::resource("")
                                .route(web::get().to(room::get_rooms))
                                .route(web::post().to(room::create_room)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(room::get_room))
                                .route(web::put().to(room::update_room))
                                .route(web::delete().to(room::delete_room)),
                        ),
                )
                .service(
                    web::scope("/meetings")
                        .service(
                            web::resource("")
                                .route(web::get().to(meeting::get_meetings))
                                .route(web::post().to(meeting::create_meeting)),
                        )
                        .service(
                            web::resource("/statistics")
                                .route(web::get().to(meeting::get_statistics)),
                        )
                        .service(
                            web::resource("/statistics/date/{date}")
                                .route(web::get().to(meeting::get_statistics_by_date)),
                        )
                        .service(
                            web::resource("/statistics/month/{year}/{month}")
                                .route(web::get().to(meeting::get_statistics_by_month)),
                        )
                        .service(
                            web::resource("/statistics/year/{year}")
                                .route(web::get().to(meeting::get_statistics_by_year)),
                        )
                        .service(
                            web::resource("/status/{status}")
                                .route(web::get().to(meeting::get_meetings_by_status)),
                        )
                        .service(
                            web::resource("/department/{department}")
                                .route(web::get().to(meeting::get_meetings_by_department)),
                        )
                        .service(
                            web::resource("/room/{room}")
                                .route(web::get().to(meeting::get_meetings_by_room)),
                        )
                        .service(
                            web::resource("/date/{date}")
                                .route(web::get().to(meeting::get_meetings_by_date)),
                        )
                        .service(
                            web::resource("/month/{year}/{month}")
                                .route(web::get().to(meeting::get_meetings_by_month)),
                        )
                        .service(
                            web::resource("/year/{year}")
                                .route(web::get().to(meeting::get_meetings_by_year)),
                        )
                        .service(
                            web::resource("/{id}")
                                .route(web::get().to(meeting::get_meeting))
                                .route(web::put().to(meeting::update_meeting))
                                .route(web::delete().to(meeting::delete_meeting)),
                        )
                        .service(
                            web::resource("/{id}/status")
                                .route(web::patch().to(meeting::update_meeting_status)),
                        ),
                ),
        );
}
