use service_core::observability::init_tracing;
use track_service::config::TrackConfig;
use track_service::services::init_metrics;
use track_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = TrackConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "track-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
