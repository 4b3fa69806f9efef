use std::fmt::{Debug, Display};

use log::trace;

use crate::core::definitions::{Cell, Figure, Move};
use crate::core::utils::{in_direction, Square, DIAGONAL_DIR, KNIGHT_STEPS, STRAIGHT_DIR};

#[derive(PartialEq, Eq, Hash, Debug, Default, Clone, Copy)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const KINDS: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /** White (uppercase) letter of the piece */
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        PieceKind::KINDS
            .into_iter()
            .find(|kind| kind.letter() == letter)
    }
}

/// Opt-in rule tightenings, all off by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Reject pawn moves that don't advance towards the opponent.
    pub enforce_pawn_direction: bool,
}

/** Plain 8x8 grid, `arr[row][col]`, row 0 is black's back rank. */
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    arr: [[Cell; 8]; 8],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            arr: [[Cell::Empty; 8]; 8],
        }
    }

    /** Builds a board from 8 rows of `rnbqkp`/`RNBQKP`/`.`; whitespace is ignored. */
    pub fn from_rows(rows: &str) -> Option<Board> {
        let symbols: Vec<char> = rows.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != 64 {
            return None;
        }
        let mut board = Board::empty();
        for (idx, symbol) in symbols.into_iter().enumerate() {
            board.arr[idx / 8][idx % 8] = Cell::from_char(symbol)?;
        }
        Some(board)
    }

    /** Caller guarantees `square` is on the board. */
    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        self.arr[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, cell: Cell) {
        self.arr[square.row as usize][square.col as usize] = cell;
    }

    /** Moves whatever stands on `from` to `to` and returns the previous content of `to`. */
    pub fn execute(&mut self, _move: Move) -> Cell {
        let captured = self.get(_move.to);
        self.set(_move.to, self.get(_move.from));
        self.set(_move.from, Cell::Empty);
        captured
    }

    /** Undo of `execute`, `captured` is its return value. */
    pub fn undo(&mut self, _move: Move, captured: Cell) {
        self.set(_move.from, self.get(_move.to));
        self.set(_move.to, captured);
    }

    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.iter_squares().find(|square| {
            self.get(*square) == Cell::Figure(Figure::new(PieceKind::King, side))
        })
    }

    pub fn count(&self, figure: Figure) -> usize {
        self.iter().filter(|cell| *cell == Cell::Figure(figure)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.arr.iter().flat_map(|row| row.iter().copied())
    }

    pub fn iter_squares(&self) -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
    }

    /** 8 rows of 8 symbols, each row followed by `\n`. */
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in &self.arr {
            out.extend(row.iter().map(|cell| cell.to_char()));
            out.push('\n');
        }
        out
    }

    /**
     * Whether any piece of `by` reaches `square` in one move along a diagonal
     * (bishop, queen), a straight line (rook, queen) or a knight jump.
     * Kings and pawns are not scanned.
     */
    pub fn is_square_attacked(&self, square: Square, by: Side) -> bool {
        let attacker = |kind| Cell::Figure(Figure::new(kind, by));
        let queen = attacker(PieceKind::Queen);

        let ray_hit = |directions: &[(i8, i8)], slider: Cell| {
            directions.iter().any(|dir| {
                in_direction(square, *dir)
                    .map(|pos| self.get(pos))
                    .find(|cell| !cell.is_empty())
                    .map(|cell| cell == slider || cell == queen)
                    .unwrap_or(false)
            })
        };
        if ray_hit(&DIAGONAL_DIR, attacker(PieceKind::Bishop)) {
            trace!("{square} is attacked diagonally by {by}");
            return true;
        }
        if ray_hit(&STRAIGHT_DIR, attacker(PieceKind::Rook)) {
            trace!("{square} is attacked straight by {by}");
            return true;
        }
        let knight = attacker(PieceKind::Knight);
        KNIGHT_STEPS
            .iter()
            .filter_map(|(d_row, d_col)| square.offset(*d_row, *d_col))
            .any(|pos| self.get(pos) == knight)
    }

    /**
     * Geometric legality of `_move` for `figure`. Intermediate squares are
     * not inspected; a pawn's diagonal step needs an occupied destination.
     */
    pub fn shape_allows(&self, figure: Figure, _move: Move, options: RuleOptions) -> bool {
        match figure.kind {
            PieceKind::King => _move.is_king_step(),
            PieceKind::Queen => _move.is_diagonal() || _move.is_straight(),
            PieceKind::Bishop => _move.is_diagonal(),
            PieceKind::Rook => _move.is_straight(),
            PieceKind::Knight => _move.is_knight_shape(),
            PieceKind::Pawn => {
                if options.enforce_pawn_direction && !pawn_advances(figure.side, _move) {
                    return false;
                }
                if _move.is_pawn_diagonal_step() {
                    !self.get(_move.to).is_empty()
                } else {
                    _move.is_pawn_single_step()
                }
            }
        }
    }
}

fn pawn_advances(side: Side, _move: Move) -> bool {
    match side {
        Side::White => _move.to.row < _move.from.row,
        Side::Black => _move.to.row > _move.from.row,
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_rows(
            "rnbqkbnr
             pppppppp
             ........
             ........
             ........
             ........
             PPPPPPPP
             RNBQKBNR",
        )
        .unwrap_or_else(Board::empty)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board")?;
        f.write_str(&self.render())
    }
}
