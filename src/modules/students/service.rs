use anyhow::anyhow;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    AddStudentsDto, ApplicationActivity, ApplicationStatusRow, ApprovalStatus,
    CreateApplicationDto, StudentSummary,
};

#[derive(sqlx::FromRow)]
struct OwnedApplication {
    hod_approval_status: ApprovalStatus,
}

/// Fetch an application only if `requester` created it. Absence and foreign
/// ownership collapse into the same 404 response.
async fn owned_application(
    tx: &mut Transaction<'_, Postgres>,
    application_id: Uuid,
    requester: &str,
) -> Result<OwnedApplication, AppError> {
    sqlx::query_as::<_, OwnedApplication>(
        "SELECT hod_approval_status FROM applications WHERE id = $1 AND applied_by = $2",
    )
    .bind(application_id)
    .bind(requester)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::not_found(anyhow!("Application not found or unauthorized")))
}

/// Collapse repeated regnos in the submitted list, keeping first occurrence
/// order. The roster primary key would reject the duplicates anyway; this
/// keeps a sloppy request from failing wholesale.
fn unique_regnos(regnos: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(regnos.len());
    for regno in regnos {
        if !unique.contains(&regno.as_str()) {
            unique.push(regno.as_str());
        }
    }
    unique
}

pub struct StudentService;

impl StudentService {
    /// Create an application plus one roster row per participant, atomically.
    ///
    /// `dep_id` and `academic_term_id` are copied from the creator's student
    /// record; a missing record fails the whole request. Every participant
    /// starts `pending`, the creator included.
    #[instrument(skip(db, dto))]
    pub async fn create_application(
        db: &PgPool,
        creator: &str,
        dto: CreateApplicationDto,
    ) -> Result<Uuid, AppError> {
        let mut tx = db.begin().await?;

        let application_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO applications
                 (event_name, from_date, to_date, type, applied_by, dep_id, academic_term_id)
             SELECT $1, $2, $3, $4, regno, dep_id, academic_term_id
             FROM students
             WHERE regno = $5
             RETURNING id",
        )
        .bind(&dto.event_name)
        .bind(dto.from_date)
        .bind(dto.to_date)
        .bind(&dto.application_type)
        .bind(creator)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Student record not found")))?;

        for regno in unique_regnos(&dto.students) {
            sqlx::query(
                "INSERT INTO application_students (application_id, regno, mentor_approval_status)
                 VALUES ($1, $2, $3)",
            )
            .bind(application_id)
            .bind(regno)
            .bind(ApprovalStatus::Pending)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(application_id)
    }

    /// Delete an application and its whole roster, atomically. Only the
    /// creator may delete, and only while the application is not yet
    /// HOD-approved.
    #[instrument(skip(db))]
    pub async fn delete_application(
        db: &PgPool,
        requester: &str,
        application_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let application = owned_application(&mut tx, application_id, requester).await?;

        if application.hod_approval_status == ApprovalStatus::Approved {
            return Err(AppError::forbidden(anyhow!(
                "Cannot delete an approved application"
            )));
        }

        sqlx::query("DELETE FROM application_students WHERE application_id = $1")
            .bind(application_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(application_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Add students to an existing roster.
    ///
    /// Regnos already on the roster are skipped silently; the store's
    /// composite key makes the skip race-free (`ON CONFLICT DO NOTHING`
    /// instead of check-then-insert). Adding to an already HOD-approved
    /// application is forbidden, and a request that adds nobody is a 400.
    #[instrument(skip(db, dto))]
    pub async fn add_students(
        db: &PgPool,
        requester: &str,
        application_id: Uuid,
        dto: AddStudentsDto,
    ) -> Result<u64, AppError> {
        let mut tx = db.begin().await?;

        let application = owned_application(&mut tx, application_id, requester).await?;

        if application.hod_approval_status == ApprovalStatus::Approved {
            return Err(AppError::forbidden(anyhow!(
                "Cannot add students to an approved application"
            )));
        }

        let mut added = 0u64;
        for regno in unique_regnos(&dto.students) {
            let result = sqlx::query(
                "INSERT INTO application_students (application_id, regno, mentor_approval_status)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (application_id, regno) DO NOTHING",
            )
            .bind(application_id)
            .bind(regno)
            .bind(ApprovalStatus::Pending)
            .execute(&mut *tx)
            .await?;

            added += result.rows_affected();
        }

        if added == 0 {
            return Err(AppError::bad_request(anyhow!(
                "No new valid students to add"
            )));
        }

        tx.commit().await?;

        Ok(added)
    }

    /// Remove one student from an application's roster.
    #[instrument(skip(db))]
    pub async fn remove_student(
        db: &PgPool,
        requester: &str,
        application_id: Uuid,
        regno: &str,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let application = owned_application(&mut tx, application_id, requester).await?;

        if application.hod_approval_status == ApprovalStatus::Approved {
            return Err(AppError::forbidden(anyhow!(
                "Cannot delete students from an approved application"
            )));
        }

        let result =
            sqlx::query("DELETE FROM application_students WHERE application_id = $1 AND regno = $2")
                .bind(application_id)
                .bind(regno)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(
                "Student not found in application"
            )));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Substring lookup on regno for the roster picker, capped at 10 rows.
    #[instrument(skip(db))]
    pub async fn search_students(
        db: &PgPool,
        fragment: &str,
    ) -> Result<Vec<StudentSummary>, AppError> {
        let students = sqlx::query_as::<_, StudentSummary>(
            "SELECT regno, name, section
             FROM students
             WHERE regno ILIKE '%' || $1 || '%'
             ORDER BY regno
             LIMIT 10",
        )
        .bind(fragment)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    /// Every application the student participates in, with their own mentor
    /// approval state, newest first.
    #[instrument(skip(db))]
    pub async fn application_status(
        db: &PgPool,
        regno: &str,
    ) -> Result<Vec<ApplicationStatusRow>, AppError> {
        let applications = sqlx::query_as::<_, ApplicationStatusRow>(
            "SELECT a.id, a.event_name, a.from_date, a.to_date, a.type,
                    a.status, a.hod_approval_status, ast.mentor_approval_status
             FROM applications a
             JOIN application_students ast ON a.id = ast.application_id
             WHERE ast.regno = $1
             ORDER BY a.applied_date DESC",
        )
        .bind(regno)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }

    /// Detailed view of one application for one participant.
    #[instrument(skip(db))]
    pub async fn application_activity(
        db: &PgPool,
        application_id: Uuid,
        regno: &str,
    ) -> Result<ApplicationActivity, AppError> {
        sqlx::query_as::<_, ApplicationActivity>(
            "SELECT a.id, a.event_name, a.applied_date, a.status, a.hod_approval_status,
                    d.name AS department, at.name AS academic_term,
                    ast.mentor_approval_status, ast.mentor_approval_date, ast.mentor_comment
             FROM applications a
             JOIN application_students ast ON a.id = ast.application_id
             JOIN departments d ON a.dep_id = d.id
             JOIN academic_terms at ON a.academic_term_id = at.id
             WHERE a.id = $1 AND ast.regno = $2",
        )
        .bind(application_id)
        .bind(regno)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Application not found")))
    }
}
