use actix_web::HttpServer;
use ridex_api::{AppMetrics, AppState, ServerConfig, create_app, telemetry};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal outside local development
    let dotenv = dotenvy::dotenv();

    let server_config = ServerConfig::from_env();
    telemetry::init_tracing(&server_config)?;

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let metrics = AppMetrics::new()?;
    let state = AppState::from_env(&metrics)?;

    tracing::info!(
        bind_address = %server_config.bind_address,
        metrics_enabled = server_config.metrics_enabled,
        "Starting server"
    );

    let bind_address = server_config.bind_address.clone();
    HttpServer::new(move || create_app(state.clone(), metrics.clone(), server_config.clone()))
        .bind(bind_address)?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
