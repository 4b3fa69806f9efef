use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::core::engine::Side;
use crate::core::protocol::{GameId, ServerMessage};

pub use uuid::Uuid;

#[allow(unused_imports)]
pub use log::{debug, error, info, trace, warn};

/// What a connection's writer task is asked to do.
#[derive(Debug)]
pub enum Packet {
    Text(String),
    Close,
}

impl From<ServerMessage> for Packet {
    fn from(value: ServerMessage) -> Self {
        Packet::Text(value.to_string())
    }
}

pub struct Client {
    pub id: Uuid,
    pub sender: UnboundedSender<Packet>,
    pub game_id: GameId,
    pub side: Side,
    /// Taken on shutdown so the server can wait for pending writes.
    pub writer: Option<JoinHandle<()>>,
}

pub struct OnlineGame {
    pub id: GameId,
    pub sender: UnboundedSender<(Side, ClientMessage)>,
    pub white: Option<Client>,
    pub black: Option<Client>,
    /// Set once a player left or the handler finished; no one is seated afterwards.
    pub closing: bool,
}

#[derive(Debug)]
pub enum ClientMessage {
    Connected,
    Disconnect,
    MakeMove(String),
    Shutdown,
}

impl OnlineGame {
    pub fn get_player(&self, player: Side) -> Option<&Client> {
        match player {
            Side::Black => self.black.as_ref(),
            Side::White => self.white.as_ref(),
        }
    }

    pub fn get_player_mut(&mut self, player: Side) -> &mut Option<Client> {
        match player {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    pub fn awaiting_opponent(&self) -> bool {
        !self.closing && self.white.is_some() && self.black.is_none()
    }
}

/**
 * All running games plus the connection -> game index.
 * Holds routing data only, game state lives in each game's handler task.
 */
pub struct Registry {
    games: HashMap<GameId, OnlineGame>,
    connections: HashMap<Uuid, GameId>,
    max_games: usize,
}

pub type Rooms = Arc<RwLock<Registry>>;

impl Registry {
    pub fn new(max_games: usize) -> Registry {
        Registry {
            games: HashMap::new(),
            connections: HashMap::new(),
            max_games,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, game_id: GameId) -> Option<&OnlineGame> {
        self.games.get(&game_id)
    }

    /** Lowest-numbered game that still waits for black. */
    pub fn find_waiting(&self) -> Option<GameId> {
        self.games
            .values()
            .filter(|game| game.awaiting_opponent())
            .map(|game| game.id)
            .min()
    }

    /** Lowest unused game id, `None` when the server is full. */
    pub fn free_slot(&self) -> Option<GameId> {
        (0..self.max_games).find(|id| !self.games.contains_key(id))
    }

    pub fn lookup(&self, connection: Uuid) -> Option<(&OnlineGame, Side)> {
        let game = self.games.get(self.connections.get(&connection)?)?;
        [Side::White, Side::Black]
            .into_iter()
            .find(|side| game.get_player(*side).map(|client| client.id) == Some(connection))
            .map(|side| (game, side))
    }

    pub fn open(&mut self, game: OnlineGame) {
        for client in [&game.white, &game.black].into_iter().flatten() {
            self.connections.insert(client.id, game.id);
        }
        self.games.insert(game.id, game);
    }

    /** Seats `client` in its `game_id` on its side. Returns the game's handler channel. */
    pub fn seat(&mut self, client: Client) -> Option<UnboundedSender<(Side, ClientMessage)>> {
        let game_id = client.game_id;
        let game = self.games.get_mut(&game_id)?;
        if game.closing {
            return None;
        }
        let seat = game.get_player_mut(client.side);
        if seat.is_some() {
            return None;
        }
        self.connections.insert(client.id, game_id);
        *seat = Some(client);
        Some(game.sender.clone())
    }

    /** Stops `game_id` from taking new players. */
    pub fn mark_closing(&mut self, game_id: GameId) {
        if let Some(game) = self.games.get_mut(&game_id) {
            game.closing = true;
        }
    }

    /** Marks the game `connection` is seated in as closing, if it is still registered. */
    pub fn close_for(&mut self, connection: Uuid) {
        if let Some(game_id) = self.connections.get(&connection).copied() {
            self.mark_closing(game_id);
        }
    }

    pub fn remove(&mut self, game_id: GameId) -> Option<OnlineGame> {
        let game = self.games.remove(&game_id)?;
        for client in [&game.white, &game.black].into_iter().flatten() {
            self.connections.remove(&client.id);
        }
        Some(game)
    }

    pub fn games(&self) -> impl Iterator<Item = &OnlineGame> {
        self.games.values()
    }

    pub fn take_writers(&mut self) -> Vec<JoinHandle<()>> {
        self.games
            .values_mut()
            .flat_map(|game| [game.white.as_mut(), game.black.as_mut()])
            .flatten()
            .filter_map(|client| client.writer.take())
            .collect()
    }
}
