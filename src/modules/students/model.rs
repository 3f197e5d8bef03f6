use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Approval state of an application (overall, HOD, or per-student mentor).
///
/// A closed set mirrored by the `approval_status` Postgres enum: any value
/// outside it is rejected at deserialization, before any store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationDto {
    #[validate(length(min = 1, message = "event_name is required"))]
    pub event_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub application_type: String,
    /// Regnos of all participating students, the creator included.
    #[validate(length(min = 1, message = "students must not be empty"))]
    pub students: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateApplicationResponse {
    pub message: String,
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
}

/// Roster additions. An empty or all-duplicate list fails with 400 in the
/// service, so no minimum length is enforced here.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddStudentsDto {
    pub students: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddStudentsResponse {
    pub message: String,
    #[serde(rename = "addedCount")]
    pub added_count: u64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring to match against registration numbers.
    pub regno: String,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct StudentSummary {
    pub regno: String,
    pub name: String,
    pub section: String,
}

/// One row of the caller's application list: the application joined with the
/// caller's own participant record.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ApplicationStatusRow {
    pub id: Uuid,
    pub event_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub application_type: String,
    pub status: ApprovalStatus,
    pub hod_approval_status: ApprovalStatus,
    pub mentor_approval_status: ApprovalStatus,
}

/// Detailed activity view of one application for one participant, including
/// department and academic term names and the mentor's decision trail.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ApplicationActivity {
    pub id: Uuid,
    pub event_name: String,
    pub applied_date: DateTime<Utc>,
    pub status: ApprovalStatus,
    pub hod_approval_status: ApprovalStatus,
    pub department: String,
    pub academic_term: String,
    pub mentor_approval_status: ApprovalStatus,
    pub mentor_approval_date: Option<DateTime<Utc>>,
    pub mentor_comment: Option<String>,
}
