use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use gridcal_server::{app, AppState};

/// HTTP server for gridcal - serves the calendar API for GUI clients
#[derive(Parser, Debug)]
#[command(name = "gridcal-server", version, about)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 4096)]
    port: u16,

    /// Path to the SQLite database file
    #[arg(long, default_value = "gridcal.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let state = AppState::new(&args.db)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app(state).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("gridcal-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
