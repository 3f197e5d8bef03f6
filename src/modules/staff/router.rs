use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    department_applications, mentee_applications, review_application, student_applications,
};

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/department-applications", get(department_applications))
        .route("/mentee-applications", get(mentee_applications))
        .route(
            "/applications/{id}/students/{regno}/approve",
            post(review_application),
        )
        .route("/student-applications", get(student_applications))
}
