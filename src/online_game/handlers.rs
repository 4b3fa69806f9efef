use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use tokio::net::TcpListener;

use crate::core::engine::{RuleOptions, Side};
use crate::online_game::definitions::*;
use crate::online_game::logic::client_connection;

/// How long shutdown waits for goodbye messages to be written.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/**
 * Accepts players until `shutdown` resolves, then tells every game the
 * server is going down and waits for the goodbyes to be flushed.
 */
pub async fn serve<F>(
    listener: TcpListener,
    rooms: Rooms,
    options: RuleOptions,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    debug!("Get new connection from {}", addr);
                    tokio::task::spawn(client_connection(stream, rooms.clone(), options));
                }
                Err(err) => error!("Failed to accept connection: {}", err),
            },
            _ = &mut shutdown => break,
        }
    }
    info!("Shutting down server gracefully...");
    shutdown_games(&rooms).await;
    Ok(())
}

pub async fn shutdown_games(rooms: &Rooms) {
    let writers = {
        let mut rooms = rooms.write().await;
        for game in rooms.games() {
            let _ = game.sender.send((Side::White, ClientMessage::Shutdown));
        }
        rooms.take_writers()
    };
    let count = writers.len();
    if tokio::time::timeout(SHUTDOWN_GRACE, join_all(writers))
        .await
        .is_err()
    {
        warn!("Not all of {} clients were notified about shutdown", count);
    }
    info!("Server shutdown complete.");
}
