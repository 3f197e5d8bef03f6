use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AddStudentsDto, AddStudentsResponse, ApplicationActivity, ApplicationStatusRow,
    CreateApplicationDto, CreateApplicationResponse, SearchQuery, StudentSummary,
};
use super::service::StudentService;

/// Submit a new leave/on-duty application
#[utoipa::path(
    post,
    path = "/api/students/applications",
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application created", body = CreateApplicationResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state, dto))]
pub async fn create_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateApplicationDto>,
) -> Result<(StatusCode, Json<CreateApplicationResponse>), AppError> {
    let application_id =
        StudentService::create_application(&state.db, &auth_user.user_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateApplicationResponse {
            message: "Application created successfully".to_string(),
            application_id,
        }),
    ))
}

/// Delete an application the caller created
#[utoipa::path(
    delete,
    path = "/api/students/applications/{id}",
    params(("id" = Uuid, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application deleted", body = MessageResponse),
        (status = 403, description = "Application already HOD-approved", body = ErrorResponse),
        (status = 404, description = "Application not found or unauthorized", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state))]
pub async fn delete_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_application(&state.db, &auth_user.user_id, id).await?;

    Ok(Json(MessageResponse {
        message: "Application deleted successfully".to_string(),
    }))
}

/// Search students by regno fragment
#[utoipa::path(
    get,
    path = "/api/students/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching students, at most 10", body = [StudentSummary]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state))]
pub async fn search_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<StudentSummary>>, AppError> {
    let students = StudentService::search_students(&state.db, &query.regno).await?;
    Ok(Json(students))
}

/// List the caller's applications with their approval states
#[utoipa::path(
    get,
    path = "/api/students/applications/status",
    responses(
        (status = 200, description = "Applications the caller participates in", body = [ApplicationStatusRow]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state))]
pub async fn application_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ApplicationStatusRow>>, AppError> {
    let applications = StudentService::application_status(&state.db, &auth_user.user_id).await?;
    Ok(Json(applications))
}

/// Detailed activity view of one application
#[utoipa::path(
    get,
    path = "/api/students/applications/{id}/activities",
    params(("id" = Uuid, Path, description = "Application id")),
    responses(
        (status = 200, description = "Activity for the caller's participation", body = ApplicationActivity),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state))]
pub async fn application_activity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationActivity>, AppError> {
    let activity =
        StudentService::application_activity(&state.db, id, &auth_user.user_id).await?;
    Ok(Json(activity))
}

/// Add students to an application's roster
#[utoipa::path(
    post,
    path = "/api/students/applications/{id}/students",
    params(("id" = Uuid, Path, description = "Application id")),
    request_body = AddStudentsDto,
    responses(
        (status = 200, description = "Students added", body = AddStudentsResponse),
        (status = 400, description = "No new valid students to add", body = ErrorResponse),
        (status = 403, description = "Application already HOD-approved", body = ErrorResponse),
        (status = 404, description = "Application not found or unauthorized", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state, dto))]
pub async fn add_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AddStudentsDto>,
) -> Result<Json<AddStudentsResponse>, AppError> {
    let added_count = StudentService::add_students(&state.db, &auth_user.user_id, id, dto).await?;

    Ok(Json(AddStudentsResponse {
        message: "Students added successfully".to_string(),
        added_count,
    }))
}

/// Remove one student from an application's roster
#[utoipa::path(
    delete,
    path = "/api/students/applications/{id}/students/{regno}",
    params(
        ("id" = Uuid, Path, description = "Application id"),
        ("regno" = String, Path, description = "Registration number to remove")
    ),
    responses(
        (status = 200, description = "Student removed", body = MessageResponse),
        (status = 403, description = "Application already HOD-approved", body = ErrorResponse),
        (status = 404, description = "Application or roster entry not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Applications"
)]
#[instrument(skip(state))]
pub async fn remove_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, regno)): Path<(Uuid, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::remove_student(&state.db, &auth_user.user_id, id, &regno).await?;

    Ok(Json(MessageResponse {
        message: "Student removed from application successfully".to_string(),
    }))
}
