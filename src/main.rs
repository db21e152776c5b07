use std::sync::Arc;

use clap::Parser;

use safecracker_panel::config::Args;
use safecracker_panel::panel::{CommandDispatcher, ConnectionStatus, PanelState};
use safecracker_panel::serial::SerialSession;
use safecracker_panel::web::{self, AppContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let state = Arc::new(PanelState::new());
    let session = Arc::new(SerialSession::new(&args.port, args.baud));

    // One attempt, at startup only. A failed open leaves the panel serving
    // HTTP in degraded mode; device commands answer "not connected".
    match session.clone().open(state.clone()).await {
        Ok(()) => {
            state.set_connection(ConnectionStatus::Connected).await;
            let banner = format!("Connected to device on {} at {} baud", args.port, args.baud);
            state.append_transcript(&banner).await;
            log::info!("{}", banner);
        }
        Err(e) => {
            state.set_connection(ConnectionStatus::Failed(e.to_string())).await;
            state.append_transcript(&format!("Connection failed: {e}")).await;
            log::error!("Failed to connect to device: {}", e);
        }
    }

    let dispatcher = CommandDispatcher::new(session.clone(), state.clone());
    let ctx = Arc::new(AppContext { state, dispatcher });
    let app = web::router(ctx);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    log::info!("Starting Safe-Cracker control panel at http://{}", args.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Runs on any shutdown path once the server has drained
    session.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
