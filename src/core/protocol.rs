use std::fmt::Display;

use crate::core::definitions::IllegalMove;
use crate::core::engine::{Board, Side};

pub type GameId = usize;

/// Lines the server writes to a client. `Display` is the exact wire text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Welcome { side: Side, game_id: GameId },
    GameStarting { game_id: GameId },
    /// Game header followed by the rendered board.
    Board { game_id: GameId, rows: String },
    Error(String),
    Check,
    Won,
    Lost,
    OpponentDisconnected,
    ShuttingDown,
}

impl ServerMessage {
    pub fn board(game_id: GameId, board: &Board) -> Self {
        ServerMessage::Board {
            game_id,
            rows: board.render(),
        }
    }

    pub fn error<T: Display>(reason: T) -> Self {
        ServerMessage::Error(reason.to_string())
    }
}

impl From<IllegalMove> for ServerMessage {
    fn from(value: IllegalMove) -> Self {
        ServerMessage::error(value)
    }
}

impl Display for ServerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerMessage::Welcome {
                side: Side::White,
                game_id,
            } => writeln!(
                f,
                "Welcome! You are Player White in Game #{game_id}. Waiting for opponent..."
            ),
            ServerMessage::Welcome {
                side: Side::Black,
                game_id,
            } => writeln!(f, "Welcome! You are Player Black in Game #{game_id}"),
            ServerMessage::GameStarting { game_id } => writeln!(f, "Game #{game_id} is starting!"),
            ServerMessage::Board { game_id, rows } => {
                write!(f, "\nGame #{game_id}\nboard {rows}")
            }
            ServerMessage::Error(reason) => writeln!(f, "e {reason}"),
            ServerMessage::Check => writeln!(f, "Check!"),
            ServerMessage::Won => writeln!(f, "You win! Game over."),
            ServerMessage::Lost => writeln!(f, "You lost. Game over."),
            ServerMessage::OpponentDisconnected => {
                writeln!(f, "x Opponent disconnected. Game over.")
            }
            ServerMessage::ShuttingDown => writeln!(f, "Server shutting down. Game over."),
        }
    }
}
