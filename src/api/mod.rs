use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::put;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

#[derive(Deserialize)]
struct StudentQueryParams {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    search: String,
    course_id: Option<i64>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Serialize)]
struct Pagination {
    total: i64,
    page: i64,
    limit: i64,
    #[serde(rename = "totalPages")]
    total_pages: i64,
}

#[derive(Serialize)]
struct PaginatedStudents {
    data: Vec<StudentWithCourse>,
    pagination: Pagination,
}

#[derive(Serialize)]
struct CreatedStudent {
    success: bool,
    data: Student,
}

#[derive(Serialize)]
struct UpdateAck {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/courses", get(list_courses).post(create_course))
        .route("/api/courses/{id}", put(update_course).delete(delete_course))
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "API is running..."
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = repository::insert_course(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CourseRequest>,
) -> Result<Json<Course>, AppError> {
    let course = repository::update_course(&state.db, id, req).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    repository::delete_course(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}

async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<PaginatedStudents>, AppError> {
    let page = params.page.max(1);
    let limit = params.limit.max(1);

    let (data, total) =
        repository::list_students(&state.db, &params.search, params.course_id, page, limit)
            .await?;

    let total_pages = (total + limit - 1) / limit;

    Ok(Json(PaginatedStudents {
        data,
        pagination: Pagination {
            total,
            page,
            limit,
            total_pages,
        },
    }))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentWithCourse>, AppError> {
    let student = repository::find_student_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<StudentRequest>,
) -> Result<(StatusCode, Json<CreatedStudent>), AppError> {
    let student = repository::insert_student(&state.db, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedStudent {
            success: true,
            data: student,
        }),
    ))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StudentRequest>,
) -> Result<Json<UpdateAck>, AppError> {
    repository::update_student(&state.db, id, req).await?;
    Ok(Json(UpdateAck {
        success: true,
        message: "Student updated successfully".to_string(),
    }))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    repository::delete_student(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    }))
}
