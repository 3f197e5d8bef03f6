mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    add_participant, auth_cookie, count_rows, create_application, create_credential,
    create_department, create_staff, create_student, create_term, setup_test_app, set_hod_status,
    unique_email, unique_name, unique_regno, unique_staff_id,
};
use http_body_util::BodyExt;
use odleave::modules::auth::model::{Role, UserType};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

struct Campus {
    dep_id: Uuid,
    term_id: Uuid,
    mentor_id: String,
    mentor_cred: Uuid,
    regno_a: String,
    cred_a: Uuid,
    regno_b: String,
    cred_b: Uuid,
}

/// One department with one mentor and two of their students, all with
/// credentials.
async fn seed_campus(pool: &PgPool) -> Campus {
    let dep_id = create_department(pool, &unique_name("Dept")).await;
    let term_id = create_term(pool, &unique_name("Term")).await;

    let mentor_id = unique_staff_id();
    create_staff(pool, &mentor_id, "staff", dep_id).await;
    let mentor_cred = create_credential(
        pool,
        &unique_email(),
        &mentor_id,
        UserType::Staff,
        "mentorpass1",
        false,
    )
    .await;

    let regno_a = unique_regno();
    create_student(pool, &regno_a, "A", dep_id, term_id, &mentor_id).await;
    let cred_a = create_credential(
        pool,
        &unique_email(),
        &regno_a,
        UserType::Student,
        "studentpass1",
        false,
    )
    .await;

    let regno_b = unique_regno();
    create_student(pool, &regno_b, "A", dep_id, term_id, &mentor_id).await;
    let cred_b = create_credential(
        pool,
        &unique_email(),
        &regno_b,
        UserType::Student,
        "studentpass1",
        false,
    )
    .await;

    Campus {
        dep_id,
        term_id,
        mentor_id,
        mentor_cred,
        regno_a,
        cred_a,
        regno_b,
        cred_b,
    }
}

fn json_request(method: &str, uri: &str, cookie: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("cookie", cookie)
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_application_inserts_application_and_roster(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students/applications",
            &auth_cookie(campus.cred_a, Role::Student),
            json!({
                "event_name": "Hackathon",
                "from_date": "2026-02-01",
                "to_date": "2026-02-03",
                "type": "od",
                "students": [campus.regno_a, campus.regno_b]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let application_id: Uuid = body["applicationId"].as_str().unwrap().parse().unwrap();

    assert_eq!(
        count_rows(&pool, "SELECT COUNT(*) FROM applications WHERE id = $1", application_id).await,
        1
    );
    assert_eq!(
        count_rows(
            &pool,
            "SELECT COUNT(*) FROM application_students WHERE application_id = $1",
            application_id
        )
        .await,
        2
    );

    // dep/term copied from the creator's student record, everyone pending
    let (dep_id, applied_by) = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT dep_id, applied_by FROM applications WHERE id = $1",
    )
    .bind(application_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(dep_id, campus.dep_id);
    assert_eq!(applied_by, campus.regno_a);

    let pending = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM application_students
         WHERE application_id = $1 AND mentor_approval_status = 'pending'",
    )
    .bind(application_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(pending, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_application_duplicate_regnos_collapse(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students/applications",
            &auth_cookie(campus.cred_a, Role::Student),
            json!({
                "event_name": "Symposium",
                "from_date": "2026-03-01",
                "to_date": "2026-03-01",
                "type": "od",
                "students": [campus.regno_a, campus.regno_a, campus.regno_b]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let application_id: Uuid = body["applicationId"].as_str().unwrap().parse().unwrap();

    assert_eq!(
        count_rows(
            &pool,
            "SELECT COUNT(*) FROM application_students WHERE application_id = $1",
            application_id
        )
        .await,
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_application_requires_session(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/api/students/applications")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_routes_forbid_staff(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/students/applications/status",
            &auth_cookie(campus.mentor_cred, Role::Staff),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_application_by_non_owner_is_404(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    add_participant(&pool, application_id, &campus.regno_b).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/students/applications/{}", application_id),
            &auth_cookie(campus.cred_b, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // nothing was deleted
    assert_eq!(
        count_rows(&pool, "SELECT COUNT(*) FROM applications WHERE id = $1", application_id).await,
        1
    );
    assert_eq!(
        count_rows(
            &pool,
            "SELECT COUNT(*) FROM application_students WHERE application_id = $1",
            application_id
        )
        .await,
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_application_removes_application_and_roster(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    add_participant(&pool, application_id, &campus.regno_b).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/students/applications/{}", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        count_rows(&pool, "SELECT COUNT(*) FROM applications WHERE id = $1", application_id).await,
        0
    );
    assert_eq!(
        count_rows(
            &pool,
            "SELECT COUNT(*) FROM application_students WHERE application_id = $1",
            application_id
        )
        .await,
        0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_application_forbidden_once_hod_approved(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    set_hod_status(&pool, application_id, "approved").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/students/applications/{}", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_students_skips_existing_and_counts_new(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/students/applications/{}/students", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
            json!({ "students": [campus.regno_a, campus.regno_b] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["addedCount"], 1);

    assert_eq!(
        count_rows(
            &pool,
            "SELECT COUNT(*) FROM application_students WHERE application_id = $1",
            application_id
        )
        .await,
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_students_all_duplicates_is_400(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/students/applications/{}/students", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
            json!({ "students": [campus.regno_a] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "No new valid students to add");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_students_empty_list_is_400(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/students/applications/{}/students", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
            json!({ "students": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_students_forbidden_once_hod_approved(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    set_hod_status(&pool, application_id, "approved").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/students/applications/{}/students", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
            json!({ "students": [campus.regno_b] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_student_from_roster(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    add_participant(&pool, application_id, &campus.regno_b).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!(
                "/api/students/applications/{}/students/{}",
                application_id, campus.regno_b
            ),
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        count_rows(
            &pool,
            "SELECT COUNT(*) FROM application_students WHERE application_id = $1",
            application_id
        )
        .await,
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_student_not_in_roster_is_404(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!(
                "/api/students/applications/{}/students/{}",
                application_id, campus.regno_b
            ),
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_student_forbidden_once_hod_approved(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    add_participant(&pool, application_id, &campus.regno_b).await;
    set_hod_status(&pool, application_id, "approved").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!(
                "/api/students/applications/{}/students/{}",
                application_id, campus.regno_b
            ),
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_students_matches_fragment_capped_at_ten(pool: PgPool) {
    let campus = seed_campus(&pool).await;

    // a dozen students sharing a searchable prefix
    for i in 0..12 {
        let regno = format!("SRCH2026{:03}", i);
        create_student(&pool, &regno, "B", campus.dep_id, campus.term_id, &campus.mentor_id).await;
    }

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/students/search?regno=SRCH2026",
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let results = body.as_array().unwrap();

    assert_eq!(results.len(), 10);
    for row in results {
        assert!(row["regno"].as_str().unwrap().contains("SRCH2026"));
        assert!(row.get("name").is_some());
        assert!(row.get("section").is_some());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_application_status_lists_own_participations(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;
    add_participant(&pool, application_id, &campus.regno_b).await;

    // an unrelated application B is not part of
    let other_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, other_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/students/applications/status",
            &auth_cookie(campus.cred_b, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let rows = body.as_array().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], application_id.to_string());
    assert_eq!(rows[0]["mentor_approval_status"], "pending");
    assert_eq!(rows[0]["type"], "od");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_application_activity_includes_names(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/api/students/applications/{}/activities", application_id),
            &auth_cookie(campus.cred_a, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["id"], application_id.to_string());
    assert!(body["department"].as_str().unwrap().starts_with("Dept"));
    assert!(body["academic_term"].as_str().unwrap().starts_with("Term"));
    assert_eq!(body["mentor_approval_status"], "pending");
    assert!(body["mentor_comment"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_application_activity_404_for_non_participant(pool: PgPool) {
    let campus = seed_campus(&pool).await;
    let application_id = create_application(&pool, &campus.regno_a, campus.dep_id, campus.term_id).await;
    add_participant(&pool, application_id, &campus.regno_a).await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/api/students/applications/{}/activities", application_id),
            &auth_cookie(campus.cred_b, Role::Student),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
