use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::modules::students::model::ApprovalStatus;

/// A mentor's verdict on one participant. Deliberately excludes `pending`:
/// a review either approves or rejects, it never un-decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ApprovalStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => ApprovalStatus::Approved,
            ReviewDecision::Rejected => ApprovalStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewApplicationDto {
    pub status: ReviewDecision,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DepartmentQuery {
    /// Department name, e.g. "Computer Science".
    pub department: String,
    /// Class section, e.g. "A".
    pub section: String,
    /// Academic term id.
    pub semester: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentApplicationsQuery {
    pub regno: String,
}

/// Department-wide listing row: the application plus its creator.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentApplicationRow {
    pub id: Uuid,
    pub event_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub application_type: String,
    pub applied_by: String,
    pub status: ApprovalStatus,
    pub hod_approval_status: ApprovalStatus,
    pub applied_date: DateTime<Utc>,
    pub regno: String,
    pub student_name: String,
}

/// A mentee's participation still awaiting this mentor's decision.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PendingMenteeRow {
    pub id: Uuid,
    pub event_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub application_type: String,
    pub regno: String,
    pub student_name: String,
}

/// HOD-approved application of one mentee, with the mentor decision trail.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct StudentApplicationRow {
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
    pub mentor_approval_date: Option<DateTime<Utc>>,
    pub mentor_comment: Option<String>,
}
