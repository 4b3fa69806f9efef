use std::sync::Arc;

use anyhow::Context;
use chess_session::online_game::{
    config::ServerConfig,
    definitions::{Registry, Rooms},
    handlers::serve,
};
use clap::Parser;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ServerConfig::parse();
    debug!("Config: {:?}", config);
    if config.game_time.is_some() || config.increment.is_some() {
        warn!("Game clocks are not supported, --game-time and --increment are ignored");
    }

    let rooms: Rooms = Arc::new(RwLock::new(Registry::new(config.max_games)));
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        "Chess server started on {}. Waiting for players...",
        listener.local_addr()?
    );

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    };
    serve(listener, rooms, config.rule_options(), shutdown)
        .await
        .context("Server loop failed")
}
