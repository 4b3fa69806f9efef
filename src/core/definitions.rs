use std::fmt::Display;

use thiserror::Error;

use crate::core::engine::{PieceKind, Side};
use crate::core::utils::{
    is_diagonal, is_king_step, is_knight_shape, is_pawn_diagonal_step, is_pawn_single_step,
    is_straight, Square,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Figure {
    pub kind: PieceKind,
    pub side: Side,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Figure(Figure),
}

impl Figure {
    pub const fn new(kind: PieceKind, side: Side) -> Figure {
        Figure { kind, side }
    }

    /** Uppercase for white, lowercase for black */
    pub fn to_char(self) -> char {
        let letter = self.kind.letter();
        match self.side {
            Side::White => letter,
            Side::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_char(symbol: char) -> Option<Figure> {
        let kind = PieceKind::from_letter(symbol.to_ascii_uppercase())?;
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Figure { kind, side })
    }
}

impl Cell {
    pub fn figure(self) -> Option<Figure> {
        match self {
            Cell::Empty => None,
            Cell::Figure(figure) => Some(figure),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn side(self) -> Option<Side> {
        self.figure().map(|figure| figure.side)
    }

    pub fn to_char(self) -> char {
        self.figure().map(Figure::to_char).unwrap_or('.')
    }

    pub fn from_char(symbol: char) -> Option<Cell> {
        if symbol == '.' {
            Some(Cell::Empty)
        } else {
            Figure::from_char(symbol).map(Cell::Figure)
        }
    }
}

impl From<Figure> for Cell {
    fn from(value: Figure) -> Self {
        Cell::Figure(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    /** Parses a client token like `a2a4`. */
    pub fn parse(token: &str) -> MoveResult<Move> {
        let bytes = token.as_bytes();
        if bytes.len() != 4 {
            return Err(IllegalMove::MalformedMoveToken);
        }
        Ok(Move {
            from: Square::from_chars(bytes[0], bytes[1]),
            to: Square::from_chars(bytes[2], bytes[3]),
        })
    }

    pub fn in_bounds(&self) -> bool {
        self.from.is_valid() && self.to.is_valid()
    }

    pub fn is_diagonal(&self) -> bool {
        is_diagonal(self.from, self.to)
    }

    pub fn is_straight(&self) -> bool {
        is_straight(self.from, self.to)
    }

    pub fn is_king_step(&self) -> bool {
        is_king_step(self.from, self.to)
    }

    pub fn is_knight_shape(&self) -> bool {
        is_knight_shape(self.from, self.to)
    }

    pub fn is_pawn_single_step(&self) -> bool {
        is_pawn_single_step(self.from, self.to)
    }

    pub fn is_pawn_diagonal_step(&self) -> bool {
        is_pawn_diagonal_step(self.from, self.to)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Reasons a move attempt is refused. `Display` is the text sent after `e `.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("Invalid move coordinates!")]
    OutOfBounds,
    #[error("You have to make a move!")]
    NullMove,
    #[error("You have to move an existing piece!")]
    NoPieceAtSource,
    /// Carries the side of the piece the player tried to move.
    #[error("You can't move {}'s pieces!", .0.name())]
    WrongColorPiece(Side),
    #[error("Not your turn!")]
    NotYourTurn,
    #[error("This move cannot be played by this piece!")]
    IllegalShapeForPiece,
    #[error("You can't take your own pieces!")]
    CannotCaptureOwnPiece,
    #[error("This move is illegal as this piece is protecting your king from check")]
    MoveExposesOwnKingToCheck,
    #[error("Invalid move format! Use format: a2a4")]
    MalformedMoveToken,
    #[error("Game not found!")]
    GameNotFound,
}

pub type MoveResult<T> = Result<T, IllegalMove>;
