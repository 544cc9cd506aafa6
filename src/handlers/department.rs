use actix_web::{web, HttpResponse};

use super::parse_id;
use crate::errors::AppError;
use crate::models::{ApiResponse, DepartmentInput};
use crate::services::AppState;

pub async fn get_departments(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let departments = state.departments.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(departments)))
}

pub async fn get_department(
    state: web::Data<AppState>,
    department_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let department_id = parse_id(&department_id, "department")?;
    let department = state.departments.get_by_id(department_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(department)))
}

pub async fn create_department(
    state: web::Data<AppState>,
    new_department: web::Json<DepartmentInput>,
) -> Result<HttpResponse, AppError> {
    let department = state
        .departments
        .create(new_department.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        "Department created successfully",
        department,
    )))
}

pub async fn update_department(
    state: web::Data<AppState>,
    department_id: web::Path<String>,
    updates: web::Json<DepartmentInput>,
) -> Result<HttpResponse, AppError> {
    let department_id = parse_id(&department_id, "department")?;
    let department = state
        .departments
        .update(department_id, updates.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "Department updated successfully",
        department,
    )))
}

pub async fn delete_department(
    state: web::Data<AppState>,
    department_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let department_id = parse_id(&department_id, "department")?;
    state.departments.delete(department_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        "Department deleted successfully",
        (),
    )))
}
