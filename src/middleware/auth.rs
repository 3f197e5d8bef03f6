use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::modules::auth::model::UserType;
use crate::state::AppState;
use crate::utils::cookies::SESSION_COOKIE;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_session_token;

/// Extractor resolving the authenticated caller from the session cookie.
///
/// The credential row is fetched on every request, so identity always
/// reflects the store. `role_claim` is whatever the token was minted with;
/// authorization never trusts it (see [`crate::middleware::role`]).
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Credential id (`user_credentials.id`).
    pub id: Uuid,
    /// Business key: regno for students, staff_id for staff.
    pub user_id: String,
    pub user_type: UserType,
    /// Role claim from the token, informational only.
    pub role_claim: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Unauthorized - No token provided"))
            })?;

        let claims = verify_session_token(&token, &state.jwt_config)?;

        let credential_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Unauthorized - Invalid token")))?;

        #[derive(sqlx::FromRow)]
        struct CredentialRow {
            id: Uuid,
            user_id: String,
            user_type: UserType,
        }

        let credential = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, user_id, user_type FROM user_credentials WHERE id = $1",
        )
        .bind(credential_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(AuthUser {
            id: credential.id,
            user_id: credential.user_id,
            user_type: credential.user_type,
            role_claim: claims.role,
        })
    }
}
