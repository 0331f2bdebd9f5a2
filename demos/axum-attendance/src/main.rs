use std::sync::Arc;

use rollcall::{Rollcall, SqliteRepositoryProvider};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info,axum_attendance=debug,rollcall=debug")
        .init();

    info!("Starting Rollcall Axum Attendance Demo");

    // Connect to SQLite in-memory database
    let repositories = Arc::new(SqliteRepositoryProvider::connect("sqlite::memory:").await?);

    // Create the Rollcall coordinator and set up the schema
    let rollcall = Arc::new(Rollcall::new(repositories));
    rollcall.migrate().await?;
    info!("Database migrations completed");

    let app = rollcall_axum::create_router(rollcall);

    info!("Server starting on http://localhost:3000");
    info!("Available endpoints:");
    info!("  POST /tokens    - Issue a check-in token for a course/session");
    info!("  POST /checkins  - Record a check-in against a token");
    info!("  GET  /status    - Attendance status for a user/course/session");
    info!("  GET  /health    - Health check");

    // Start the server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    axum::serve(listener, app).await?;

    Ok(())
}
