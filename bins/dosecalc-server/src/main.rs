//! dosecalc-server — radiotracer dose calculator with web UI.
//!
//! Serves the web UI at `/`, the calculation API at `/api/calculate`, and
//! the nuclide, clock, saved-input and health endpoints alongside it.

use anyhow::{Context, Result};
use tracing::info;

use dosecalc_server_lib::{AppState, Config, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load dosecalc configuration")?;

    info!(
        bind = %config.bind_addr,
        persist = config.persist,
        data_file = %config.data_file.display(),
        timezone = %config.tz_name,
        utc_offset_hours = config.tz_offset_hours,
        "Starting dosecalc-server"
    );

    let state = AppState::from_config(&config);
    info!("Loaded {} nuclide(s)", state.nuclides.len());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
