pub mod core;
#[cfg(feature = "network")]
pub mod online_game;

// module re-exports
pub use crate::core::definitions::{Cell, Figure, IllegalMove, Move};
pub use crate::core::engine::{Board, PieceKind, RuleOptions, Side};
pub use crate::core::game::{Game, MoveOutcome};
pub use crate::core::session::{Session, SessionState};

#[cfg(test)]
mod tests;
