use dotenvy::dotenv;

use odleave::logging::init_tracing;
use odleave::router::init_router;
use odleave::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Out-of-band provisioning command, not served over HTTP
    if args.len() > 1 && args[1] == "create-credential" {
        handle_create_credential(args).await;
        return;
    }

    init_tracing();

    let state = init_app_state().await;
    let port = state.app_config.port;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    println!("🚀 Server running on http://localhost:{}", port);
    println!("📚 Swagger UI available at http://localhost:{}/swagger-ui", port);
    println!("📖 Scalar UI available at http://localhost:{}/scalar", port);
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_credential(args: Vec<String>) {
    if args.len() != 6 {
        eprintln!(
            "Usage: {} create-credential <email> <user_id> <student|staff> <password>",
            args[0]
        );
        std::process::exit(1);
    }

    let email = &args[2];
    let user_id = &args[3];
    let user_type = &args[4];
    let password = &args[5];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match odleave::cli::create_credential(&pool, email, user_id, user_type, password).await {
        Ok(_) => {
            println!("✅ Credential created successfully!");
            println!("   Email: {}", email);
            println!("   User: {} ({})", user_id, user_type);
        }
        Err(e) => {
            eprintln!("❌ Error creating credential: {}", e);
            std::process::exit(1);
        }
    }
}
