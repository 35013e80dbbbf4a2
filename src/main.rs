mod model;
mod server;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, scheduler::lesson_maintenance, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;

    startup::ensure_admin(&db, &config).await?;

    // Start lesson maintenance scheduler
    let scheduler_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = lesson_maintenance::start_scheduler(scheduler_db).await {
            tracing::error!("Lesson maintenance scheduler error: {}", e);
        }
    });

    let bind_address = config.bind_address;
    let app = router::router(AppState::new(db, config), session)?;

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!(address = %bind_address, "Starting server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
