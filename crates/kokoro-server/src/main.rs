use tracing_subscriber::EnvFilter;

use kokoro_core::KokoroConfig;
use kokoro_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = KokoroConfig::from_env();
    let state = AppState::from_config(&config)?;
    let app = kokoro_server::app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        data_dir = %config.data_dir.display(),
        api_key_configured = config.api_key.is_some(),
        model = %config.model,
        "kokoro server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
