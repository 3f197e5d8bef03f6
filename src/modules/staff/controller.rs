use axum::{
    Json,
    extract::{Path, Query, State},
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
    DepartmentApplicationRow, DepartmentQuery, PendingMenteeRow, ReviewApplicationDto,
    StudentApplicationRow, StudentApplicationsQuery,
};
use super::service::StaffService;

/// List applications for a department/section/term
#[utoipa::path(
    get,
    path = "/api/staff/department-applications",
    params(DepartmentQuery),
    responses(
        (status = 200, description = "Applications matching the filters", body = [DepartmentApplicationRow]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Staff Review"
)]
#[instrument(skip(state))]
pub async fn department_applications(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<DepartmentQuery>,
) -> Result<Json<Vec<DepartmentApplicationRow>>, AppError> {
    let applications = StaffService::department_applications(&state.db, &query).await?;
    Ok(Json(applications))
}

/// List the caller's mentees' pending applications
#[utoipa::path(
    get,
    path = "/api/staff/mentee-applications",
    responses(
        (status = 200, description = "Pending roster rows of the caller's mentees", body = [PendingMenteeRow]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Staff Review"
)]
#[instrument(skip(state))]
pub async fn mentee_applications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<PendingMenteeRow>>, AppError> {
    let applications =
        StaffService::pending_mentee_applications(&state.db, &auth_user.user_id).await?;
    Ok(Json(applications))
}

/// Approve or reject one participant of an application
#[utoipa::path(
    post,
    path = "/api/staff/applications/{id}/students/{regno}/approve",
    params(
        ("id" = Uuid, Path, description = "Application id"),
        ("regno" = String, Path, description = "Participating student's regno")
    ),
    request_body = ReviewApplicationDto,
    responses(
        (status = 200, description = "Decision recorded", body = MessageResponse),
        (status = 403, description = "Caller is not the student's mentor", body = ErrorResponse),
        (status = 404, description = "Student not found in application", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Staff Review"
)]
#[instrument(skip(state, dto))]
pub async fn review_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, regno)): Path<(Uuid, String)>,
    ValidatedJson(dto): ValidatedJson<ReviewApplicationDto>,
) -> Result<Json<MessageResponse>, AppError> {
    StaffService::review_application(&state.db, &auth_user.user_id, id, &regno, dto).await?;

    Ok(Json(MessageResponse {
        message: "Application status updated".to_string(),
    }))
}

/// List a mentee's HOD-approved applications
#[utoipa::path(
    get,
    path = "/api/staff/student-applications",
    params(StudentApplicationsQuery),
    responses(
        (status = 200, description = "The mentee's approved applications", body = [StudentApplicationRow]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the student's mentor", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Staff Review"
)]
#[instrument(skip(state))]
pub async fn student_applications(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<StudentApplicationsQuery>,
) -> Result<Json<Vec<StudentApplicationRow>>, AppError> {
    let applications =
        StaffService::student_applications(&state.db, &auth_user.user_id, &query.regno).await?;
    Ok(Json(applications))
}
