use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workout_tracker::api::{routes::create_routes, state::AppState};
use workout_tracker::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::connect(&config).await?;
    let app = create_routes(state);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Workout tracker listening on http://{}", address);
    info!("Health check available at http://{}/api/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
