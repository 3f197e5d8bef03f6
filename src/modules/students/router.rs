use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    add_students, application_activity, application_status, create_application,
    delete_application, remove_student, search_students,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/applications", post(create_application))
        .route("/applications/status", get(application_status))
        .route("/applications/{id}", delete(delete_application))
        .route("/applications/{id}/activities", get(application_activity))
        .route("/applications/{id}/students", post(add_students))
        .route("/applications/{id}/students/{regno}", delete(remove_student))
        .route("/search", get(search_students))
}
