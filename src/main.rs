use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use student_roster::{
    api,
    config::{self, Config},
    logging,
    roster::Roster,
};
use tokio::{net::TcpListener, signal};

#[derive(Parser)]
#[command(
    name = "student-roster",
    about = "Serve the in-memory student roster over HTTP"
)]
struct Cli {
    /// Port to bind; overrides SERVER_PORT.
    #[arg(long)]
    port: Option<u16>,
    /// Address to bind; overrides SERVER_HOST.
    #[arg(long)]
    host: Option<IpAddr>,
    /// Start without the initial students.
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server_port = Some(port);
    }
    if let Some(host) = cli.host {
        config.server_host = host;
    }
    if cli.empty {
        config.seed_roster = false;
    }
    let config = config::install(config);

    let roster = if config.seed_roster {
        Roster::seeded()
    } else {
        Roster::new()
    };
    let app = api::create_router(Arc::new(roster));

    let (listener, addr) = bind_listener(config)
        .await
        .context("failed to bind listener")?;
    tracing::info!(seeded = config.seed_roster, "Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("server terminated unexpectedly")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn bind_listener(config: &Config) -> Result<(TcpListener, SocketAddr), std::io::Error> {
    let host = config.server_host;
    if let Some(port) = config.server_port {
        let listener = TcpListener::bind((host, port)).await?;
        let addr = listener.local_addr()?;
        return Ok((listener, addr));
    }

    const PORT_RANGE: std::ops::RangeInclusive<u16> = 4100..=4199;
    for port in PORT_RANGE {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                tracing::debug!(port, "Bound server port");
                let addr = listener.local_addr()?;
                return Ok((listener, addr));
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AddrNotAvailable,
        "No available port found in range 4100-4199",
    ))
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
