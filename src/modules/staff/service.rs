use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::ApprovalStatus;
use crate::utils::errors::AppError;

use super::model::{
    DepartmentApplicationRow, DepartmentQuery, PendingMenteeRow, ReviewApplicationDto,
    StudentApplicationRow,
};

/// True when `staff_id` is the assigned tutor of `regno`.
async fn is_mentor_of(db: &PgPool, staff_id: &str, regno: &str) -> Result<bool, AppError> {
    let row = sqlx::query_scalar::<_, i32>(
        "SELECT 1 FROM students WHERE regno = $1 AND tutor_id = $2",
    )
    .bind(regno)
    .bind(staff_id)
    .fetch_optional(db)
    .await?;

    Ok(row.is_some())
}

pub struct StaffService;

impl StaffService {
    /// Applications created by students of one department/section/term.
    /// Deliberately not restricted to the caller's own department: any staff
    /// role may browse any combination.
    #[instrument(skip(db))]
    pub async fn department_applications(
        db: &PgPool,
        query: &DepartmentQuery,
    ) -> Result<Vec<DepartmentApplicationRow>, AppError> {
        let applications = sqlx::query_as::<_, DepartmentApplicationRow>(
            "SELECT a.id, a.event_name, a.from_date, a.to_date, a.type, a.applied_by,
                    a.status, a.hod_approval_status, a.applied_date,
                    s.regno, s.name AS student_name
             FROM applications a
             JOIN students s ON a.applied_by = s.regno
             JOIN departments d ON s.dep_id = d.id
             WHERE d.name = $1
               AND s.section = $2
               AND s.academic_term_id = $3
             ORDER BY a.applied_date DESC",
        )
        .bind(&query.department)
        .bind(&query.section)
        .bind(query.semester)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }

    /// Roster rows of the caller's mentees still awaiting a mentor decision.
    #[instrument(skip(db))]
    pub async fn pending_mentee_applications(
        db: &PgPool,
        staff_id: &str,
    ) -> Result<Vec<PendingMenteeRow>, AppError> {
        let applications = sqlx::query_as::<_, PendingMenteeRow>(
            "SELECT a.id, a.event_name, a.from_date, a.to_date, a.type,
                    s.regno, s.name AS student_name
             FROM applications a
             JOIN application_students ast ON a.id = ast.application_id
             JOIN students s ON ast.regno = s.regno
             WHERE s.tutor_id = $1
               AND ast.mentor_approval_status = 'pending'
             ORDER BY a.applied_date DESC",
        )
        .bind(staff_id)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }

    /// Record a mentor decision for one participant of one application.
    ///
    /// Only the student's assigned tutor may decide, and the decision is a
    /// closed approved/rejected set validated before this point. Status,
    /// comment, and timestamp move together in a single statement.
    #[instrument(skip(db, dto))]
    pub async fn review_application(
        db: &PgPool,
        staff_id: &str,
        application_id: Uuid,
        regno: &str,
        dto: ReviewApplicationDto,
    ) -> Result<(), AppError> {
        if !is_mentor_of(db, staff_id, regno).await? {
            return Err(AppError::forbidden(anyhow!(
                "Unauthorized - Not the student's mentor"
            )));
        }

        let result = sqlx::query(
            "UPDATE application_students
             SET mentor_approval_status = $1,
                 mentor_approval_date = now(),
                 mentor_comment = $2
             WHERE application_id = $3
               AND regno = $4",
        )
        .bind(ApprovalStatus::from(dto.status))
        .bind(&dto.comment)
        .bind(application_id)
        .bind(regno)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(
                "Student not found in application"
            )));
        }

        Ok(())
    }

    /// HOD-approved applications of one mentee. Mentorship is checked first;
    /// non-mentors learn nothing about the student's history.
    #[instrument(skip(db))]
    pub async fn student_applications(
        db: &PgPool,
        staff_id: &str,
        regno: &str,
    ) -> Result<Vec<StudentApplicationRow>, AppError> {
        if !is_mentor_of(db, staff_id, regno).await? {
            return Err(AppError::forbidden(anyhow!(
                "Unauthorized - Not the student's mentor"
            )));
        }

        let applications = sqlx::query_as::<_, StudentApplicationRow>(
            "SELECT a.id, a.event_name, a.from_date, a.to_date, a.type,
                    a.status, a.hod_approval_status,
                    ast.mentor_approval_status, ast.mentor_approval_date, ast.mentor_comment
             FROM applications a
             JOIN application_students ast ON a.id = ast.application_id
             WHERE ast.regno = $1
               AND a.hod_approval_status = 'approved'
             ORDER BY a.applied_date DESC",
        )
        .bind(regno)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }
}
