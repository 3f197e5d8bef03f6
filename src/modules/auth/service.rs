use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, ResetPasswordRequest, Role, UserCredential, UserType};

pub struct AuthService;

impl AuthService {
    /// Authenticate a credential by email and password.
    ///
    /// Ordering is deliberate: unknown email and wrong password are
    /// indistinguishable to the caller, and the reset-required gate fires
    /// before the password is even checked.
    #[instrument(skip(db, dto))]
    pub async fn login(db: &PgPool, dto: LoginRequest) -> Result<(UserCredential, Role), AppError> {
        let credential = sqlx::query_as::<_, UserCredential>(
            "SELECT id, email, user_id, user_type, password_hash, password_reset_required
             FROM user_credentials
             WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::bad_request(anyhow!("Invalid email or password")))?;

        if credential.password_reset_required {
            return Err(AppError::forbidden(anyhow!("Reset your password")));
        }

        if !verify_password(&dto.password, &credential.password_hash)? {
            return Err(AppError::bad_request(anyhow!("Invalid email or password")));
        }

        let role = Self::resolve_role(db, credential.user_type, &credential.user_id).await?;

        Ok((credential, role))
    }

    /// Resolve the effective role from the store. Staff roles are read fresh
    /// from the staff table; student credentials are always `student`. Used at
    /// login and again by the guard on every request, so a role change takes
    /// effect without waiting for outstanding tokens to expire.
    pub async fn resolve_role(
        db: &PgPool,
        user_type: UserType,
        user_id: &str,
    ) -> Result<Role, AppError> {
        match user_type {
            UserType::Student => Ok(Role::Student),
            UserType::Staff => {
                let role =
                    sqlx::query_scalar::<_, String>("SELECT role FROM staff WHERE staff_id = $1")
                        .bind(user_id)
                        .fetch_optional(db)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal(anyhow!("Staff record missing for {}", user_id))
                        })?;

                Role::parse(&role)
                    .ok_or_else(|| AppError::internal(anyhow!("Unknown staff role: {}", role)))
            }
        }
    }

    /// Complete a forced password reset: replace the hash and clear the flag.
    #[instrument(skip(db, dto))]
    pub async fn reset_password(db: &PgPool, dto: ResetPasswordRequest) -> Result<(), AppError> {
        let credential = sqlx::query_as::<_, UserCredential>(
            "SELECT id, email, user_id, user_type, password_hash, password_reset_required
             FROM user_credentials
             WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if !credential.password_reset_required {
            return Err(AppError::forbidden(anyhow!("Password reset not required")));
        }

        let hashed = hash_password(&dto.new_password)?;

        sqlx::query(
            "UPDATE user_credentials
             SET password_hash = $1, password_reset_required = FALSE
             WHERE email = $2",
        )
        .bind(&hashed)
        .bind(&dto.email)
        .execute(db)
        .await?;

        Ok(())
    }
}
