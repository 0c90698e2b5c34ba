use std::{fs::OpenOptions, net::{Ipv4Addr, SocketAddr}, sync::Arc};

use anyhow::Context;
use ecodrive_core::{clock::SystemClock, config::SimulatorConfig, StaticTripSource};
use server::{routes, server_state::ServerState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PORT: u16 = 3000;
const LOG_DIR: &str = "server/log";
const LOG_FILE: &str = "server/log/server.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all(LOG_DIR).context("Failed to create log directory")?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .context("Failed to open log file")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("{}=trace,ecodrive_core=debug", env!("CARGO_CRATE_NAME")).into())
        )
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file))
        .init();

    tracing::info!("Starting server...");

    let source = StaticTripSource::load_default().context("Failed to load trips")?;
    tracing::info!("Loaded {} trips", source.trip_count());

    let server_state = Arc::new(ServerState::start(
        Arc::new(source),
        Arc::new(SystemClock),
        SimulatorConfig::default(),
    )?);

    let app = routes::router(server_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT));
    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
