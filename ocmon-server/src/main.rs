//! ocmon-server - Open-channel monitoring service entry point

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocmon_server::config::Calibration;
use ocmon_server::{build_router, db, AppState};

/// Command-line arguments for ocmon-server
#[derive(Parser, Debug)]
#[command(name = "ocmon-server")]
#[command(about = "Open-channel hydraulic monitoring service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "OCMON_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "OCMON_PORT")]
    port: u16,

    /// Path to the SQLite record store
    #[arg(long, default_value = "channel_monitor.db", env = "OCMON_DB_PATH")]
    db_path: PathBuf,

    /// Optional TOML file overriding engine calibration constants
    #[arg(long, env = "OCMON_CALIBRATION")]
    calibration: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocmon_server=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting ocmon-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let calibration = Calibration::load(args.calibration.as_deref())
        .context("Failed to load calibration")?;
    if args.calibration.is_some() {
        info!("Calibration overrides loaded: {:?}", calibration);
    }

    let pool = db::init_database(&args.db_path)
        .await
        .context("Failed to initialize record store")?;

    let state = AppState::new(pool, calibration);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("ocmon-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
