use odleave::config::app::AppConfig;
use odleave::config::cors::CorsConfig;
use odleave::config::jwt::JwtConfig;
use odleave::modules::auth::model::{Role, UserType};
use odleave::router::init_router;
use odleave::state::AppState;
use odleave::utils::cookies::SESSION_COOKIE;
use odleave::utils::jwt::create_session_token;
use odleave::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        session_expiry: 15 * 24 * 60 * 60,
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec![],
        },
        app_config: AppConfig {
            environment: "development".to_string(),
            port: 3000,
        },
    };
    init_router(state)
}

/// `Cookie` header value for an authenticated request, minted the same way
/// the login handler does it.
#[allow(dead_code)]
pub fn auth_cookie(credential_id: Uuid, role: Role) -> String {
    let token = create_session_token(credential_id, role, &test_jwt_config()).unwrap();
    format!("{}={}", SESSION_COOKIE, token)
}

pub async fn create_department(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO departments (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_term(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO academic_terms (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_staff(pool: &PgPool, staff_id: &str, role: &str, dep_id: Uuid) {
    sqlx::query("INSERT INTO staff (staff_id, name, role, dep_id) VALUES ($1, $2, $3, $4)")
        .bind(staff_id)
        .bind("Test Staff")
        .bind(role)
        .bind(dep_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_student(
    pool: &PgPool,
    regno: &str,
    section: &str,
    dep_id: Uuid,
    term_id: Uuid,
    tutor_id: &str,
) {
    sqlx::query(
        "INSERT INTO students (regno, name, section, dep_id, academic_term_id, tutor_id)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(regno)
    .bind("Test Student")
    .bind(section)
    .bind(dep_id)
    .bind(term_id)
    .bind(tutor_id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_credential(
    pool: &PgPool,
    email: &str,
    user_id: &str,
    user_type: UserType,
    password: &str,
    reset_required: bool,
) -> Uuid {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO user_credentials (email, user_id, user_type, password_hash, password_reset_required)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(email)
    .bind(user_id)
    .bind(user_type)
    .bind(hashed)
    .bind(reset_required)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an application directly, bypassing the API, for read/review tests.
#[allow(dead_code)]
pub async fn create_application(
    pool: &PgPool,
    applied_by: &str,
    dep_id: Uuid,
    term_id: Uuid,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO applications
             (event_name, from_date, to_date, type, applied_by, dep_id, academic_term_id)
         VALUES ('Test Event', '2026-02-01', '2026-02-03', 'od', $1, $2, $3)
         RETURNING id",
    )
    .bind(applied_by)
    .bind(dep_id)
    .bind(term_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn add_participant(pool: &PgPool, application_id: Uuid, regno: &str) {
    sqlx::query(
        "INSERT INTO application_students (application_id, regno, mentor_approval_status)
         VALUES ($1, $2, 'pending')",
    )
    .bind(application_id)
    .bind(regno)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn set_hod_status(pool: &PgPool, application_id: Uuid, status: &str) {
    sqlx::query("UPDATE applications SET hod_approval_status = $1::approval_status WHERE id = $2")
        .bind(status)
        .bind(application_id)
        .execute(pool)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn count_rows(pool: &PgPool, sql: &str, id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn unique_regno() -> String {
    format!("URK{}", &Uuid::new_v4().simple().to_string()[..10].to_uppercase())
}

#[allow(dead_code)]
pub fn unique_staff_id() -> String {
    format!("STF{}", &Uuid::new_v4().simple().to_string()[..10].to_uppercase())
}

pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4())
}
