use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::cookies::{clear_session_cookie, session_cookie};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_session_token;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login and receive a session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Invalid email or password", body = ErrorResponse),
        (status = 403, description = "Password reset required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let (credential, role) = AuthService::login(&state.db, dto).await?;

    let token = create_session_token(credential.id, role, &state.jwt_config)?;
    let jar = jar.add(session_cookie(token, &state.jwt_config, &state.app_config));

    Ok((
        jar,
        Json(LoginResponse {
            id: credential.id,
            user_id: credential.user_id,
            user_type: credential.user_type,
            role,
        }),
    ))
}

/// Logout and clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out, session cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout_user(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(clear_session_cookie(&state.app_config));

    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Complete a forced password reset
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset successfully", body = MessageResponse),
        (status = 403, description = "Password reset not required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::reset_password(&state.db, dto).await?;

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
