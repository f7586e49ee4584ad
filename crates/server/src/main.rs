use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use game_engine::{ChanceMode, GameEngine};
use shared::domain::{PlayerId, PLAYER_COUNT};
use tokio::{
    net::TcpListener,
    sync::{mpsc, Mutex},
};
use tracing::{info, warn};

mod app_state;
mod config;
mod session;

use app_state::Room;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server listening");

    let chance = match settings.dice_seed {
        Some(seed) => {
            info!(seed, "dice seeded from configuration");
            ChanceMode::from_seed(seed)
        }
        None => ChanceMode::from_entropy(),
    };

    run_game(listener, GameEngine::new(chance)).await
}

async fn run_game(listener: TcpListener, engine: GameEngine) -> anyhow::Result<()> {
    let room = Arc::new(Mutex::new(Room::new(engine)));
    let mut sessions = Vec::with_capacity(PLAYER_COUNT);

    for player in PlayerId::ALL {
        let (stream, peer) = listener
            .accept()
            .await
            .context("failed to accept connection")?;
        info!(%peer, %player, "player connected");

        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        room.lock().await.join(player, outbound);
        sessions.push(tokio::spawn(session::run(
            room.clone(),
            player,
            stream,
            outbound_rx,
        )));
    }
    drop(listener);

    room.lock().await.start()?;

    for session in sessions {
        if let Err(error) = session.await {
            warn!(%error, "session task failed");
        }
    }
    info!("both sessions ended, shutting down");
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
