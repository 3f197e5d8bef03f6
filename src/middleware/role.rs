//! Role-based authorization guard.
//!
//! Route groups declare their allowed role set once, at the router, and the
//! single generic [`require_roles`] guard enforces it. The effective role is
//! re-resolved from the store on every request: a staff member whose role
//! changes loses or gains access immediately, regardless of what their
//! outstanding session tokens claim.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::Role;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Check that the authenticated caller's effective role is in `allowed_roles`.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let student_routes = init_students_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_student));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let effective_role =
        AuthService::resolve_role(&state.db, auth_user.user_type, &auth_user.user_id).await?;

    if !allowed_roles.contains(&effective_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Forbidden - Insufficient permissions"
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Guard for student-facing routes.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Guard for staff-facing routes (staff, HOD, and admin).
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![Role::Staff, Role::Hod, Role::Admin],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
