use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkbook_daemon::config::{DaemonConfig, Overrides, StorageKind};
use walkbook_daemon::http;

#[derive(Debug, Parser)]
#[command(name = "walkbook-daemon", version, about = "Pet-walk booking API")]
struct Args {
    /// Optional TOML config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8000
    #[arg(long)]
    listen: Option<String>,

    /// SQLite database file.
    #[arg(long, env = "WALKBOOK_DB")]
    db: Option<String>,

    /// Order store backend.
    #[arg(long, value_enum)]
    storage: Option<StorageKind>,

    /// Log level (env-filter syntax).
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = DaemonConfig::resolve(
        args.config.as_deref(),
        Overrides {
            listen: args.listen,
            db_path: args.db,
            storage: args.storage,
            log: args.log,
        },
    )?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!(?config, "starting daemon");

    let bookings = config.open_bookings()?;
    let app = http::router(bookings);

    let addr: SocketAddr = config.listen.parse()?;
    info!(listen = %addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
