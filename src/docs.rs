use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest, Role, UserType,
};
use crate::modules::staff::model::{
    DepartmentApplicationRow, PendingMenteeRow, ReviewApplicationDto, ReviewDecision,
    StudentApplicationRow,
};
use crate::modules::students::model::{
    AddStudentsDto, AddStudentsResponse, ApplicationActivity, ApplicationStatusRow,
    ApprovalStatus, CreateApplicationDto, CreateApplicationResponse, StudentSummary,
};
use crate::utils::cookies::SESSION_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::reset_password,
        crate::modules::students::controller::create_application,
        crate::modules::students::controller::delete_application,
        crate::modules::students::controller::search_students,
        crate::modules::students::controller::application_status,
        crate::modules::students::controller::application_activity,
        crate::modules::students::controller::add_students,
        crate::modules::students::controller::remove_student,
        crate::modules::staff::controller::department_applications,
        crate::modules::staff::controller::mentee_applications,
        crate::modules::staff::controller::review_application,
        crate::modules::staff::controller::student_applications,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            ResetPasswordRequest,
            MessageResponse,
            ErrorResponse,
            Role,
            UserType,
            ApprovalStatus,
            CreateApplicationDto,
            CreateApplicationResponse,
            AddStudentsDto,
            AddStudentsResponse,
            StudentSummary,
            ApplicationStatusRow,
            ApplicationActivity,
            ReviewDecision,
            ReviewApplicationDto,
            DepartmentApplicationRow,
            PendingMenteeRow,
            StudentApplicationRow,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session login, logout, and forced password reset"),
        (name = "Student Applications", description = "Leave/on-duty application lifecycle"),
        (name = "Staff Review", description = "Mentor and department-level review")
    ),
    info(
        title = "odleave API",
        version = "0.1.0",
        description = "Campus on-duty/leave application approval workflow backend built with Rust, Axum, and PostgreSQL.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            )
        }
    }
}
