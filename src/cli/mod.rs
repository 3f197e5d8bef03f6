use sqlx::PgPool;

use crate::modules::auth::model::UserType;
use crate::utils::password::hash_password;

/// Provision a login credential for an existing student or staff record.
///
/// Credentials are created out-of-band rather than through the API; the new
/// credential starts with `password_reset_required` set so the first login
/// forces a password change.
pub async fn create_credential(
    db: &PgPool,
    email: &str,
    user_id: &str,
    user_type: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user_type = match user_type {
        "student" => UserType::Student,
        "staff" => UserType::Staff,
        other => return Err(format!("Invalid user type: {}", other).into()),
    };

    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO user_credentials (email, user_id, user_type, password_hash, password_reset_required)
         VALUES ($1, $2, $3, $4, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(email)
    .bind(user_id)
    .bind(user_type)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("A credential with this email already exists".into());
    }

    Ok(())
}
