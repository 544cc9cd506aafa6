mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use secretary_backend::handlers;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(common::memory_state()))
                .configure(handlers::configure),
        )
        .await
    };
}

fn meeting_body(start: &str, end: &str) -> Value {
    json!({
        "title": "Quarterly planning",
        "startTime": start,
        "endTime": end,
        "department": "Finance",
        "room": "Room A",
        "chairman": "Director",
        "secretary": "Assistant"
    })
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn department_lifecycle_maps_status_codes() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/departments")
        .set_json(json!({ "name": "Finance", "description": "Money" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(body["data"]["createdAt"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/departments")
        .set_json(json!({ "name": "Finance" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());

    let req = test::TestRequest::put()
        .uri(&format!("/api/departments/{}", id))
        .set_json(json!({ "name": "Finance", "description": "Budgets" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/departments/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/departments/{}", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn malformed_ids_and_payloads_are_bad_requests() {
    let app = app!();

    let req = test::TestRequest::get()
        .uri("/api/rooms/not-a-uuid")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/rooms")
        .set_json(json!({ "name": "Room A", "capacity": 0 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/meetings")
        .set_json(json!({ "title": "Missing everything" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn meeting_time_range_violation_is_bad_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/meetings")
        .set_json(meeting_body("2024-03-01T10:00:00", "2024-03-01T10:00:00"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn meeting_routes_filter_and_patch_status() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/meetings")
        .set_json(meeting_body("2024-03-01T00:00:00", "2024-03-01T01:00:00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "SCHEDULED");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/meetings/month/2024/3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/meetings/month/2024/2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/meetings/date/2024-03-01")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/meetings/{}/status?status=FINISHED", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "FINISHED");
    assert_eq!(body["data"]["title"], "Quarterly planning");

    let req = test::TestRequest::get()
        .uri("/api/meetings/status/FINISHED")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/meetings/status/finished")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::patch()
        .uri(&format!("/api/meetings/{}/status?status=ongoing", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/meetings/status/cancelled")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/meetings/department/Finance")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn statistics_endpoints_return_expected_shapes() {
    let app = app!();
    for (start, end) in [
        ("2024-03-05T09:00:00", "2024-03-05T10:00:00"),
        ("2024-03-05T11:00:00", "2024-03-05T12:00:00"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/meetings")
            .set_json(meeting_body(start, end))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/meetings/statistics/date/2024-03-05")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"],
        json!({ "total": 2, "scheduled": 2, "ongoing": 0, "finished": 0 })
    );

    let req = test::TestRequest::get()
        .uri("/api/meetings/statistics/year/2024")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 2);

    let req = test::TestRequest::get()
        .uri("/api/meetings/statistics/month/2024/13")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/meetings/statistics")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let data = &body["data"];
    assert_eq!(data["totalMeetings"], 2);
    assert_eq!(data["scheduledMeetings"], 2);
    assert_eq!(data["byDepartment"]["Finance"], 2);
    assert_eq!(data["byRoom"]["Room A"], 2);
    assert_eq!(data["byStatus"]["SCHEDULED"], 2);
    assert!(data["meetingsToday"].is_number());
}
