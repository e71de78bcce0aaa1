use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaultsignal::{api, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaultsignal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting VaultSignal server on {}:{}", config.host, config.port);
    info!(
        "Analytics log at {}, history window {} days",
        config.analytics_log_path.display(),
        config.history_days
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::from_config(config);
    let app = api::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("VaultSignal server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
