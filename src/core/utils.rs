use std::fmt::Display;

/// Board coordinate. Row 0 is black's back rank, col 0 is the `a` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        is_valid_coord(self.row) && is_valid_coord(self.col)
    }

    /** Neighbouring square in `(d_row, d_col)` direction, `None` past the edge. */
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let next = Square::new(self.row + d_row, self.col + d_col);
        if next.is_valid() {
            Some(next)
        } else {
            None
        }
    }

    /** Parse algebraic pair like `e2`. Out-of-range characters give out-of-range squares. */
    pub fn from_chars(file: u8, rank: u8) -> Square {
        Square::new(
            (b'8' as i16 - rank as i16).clamp(i8::MIN as i16, i8::MAX as i16) as i8,
            (file as i16 - b'a' as i16).clamp(i8::MIN as i16, i8::MAX as i16) as i8,
        )
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            f.pad(pos_to_str(*self))
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

#[inline]
pub fn is_valid_coord(coord: i8) -> bool {
    (0..8).contains(&coord)
}

#[inline]
fn row_diff(a: Square, b: Square) -> u8 {
    a.row.abs_diff(b.row)
}

#[inline]
fn col_diff(a: Square, b: Square) -> u8 {
    a.col.abs_diff(b.col)
}

pub fn is_diagonal(a: Square, b: Square) -> bool {
    row_diff(a, b) == col_diff(a, b)
}

pub fn is_straight(a: Square, b: Square) -> bool {
    a.row == b.row || a.col == b.col
}

pub fn is_king_step(a: Square, b: Square) -> bool {
    row_diff(a, b) <= 1 && col_diff(a, b) <= 1
}

pub fn is_knight_shape(a: Square, b: Square) -> bool {
    matches!((row_diff(a, b), col_diff(a, b)), (1, 2) | (2, 1))
}

pub fn is_pawn_single_step(a: Square, b: Square) -> bool {
    a.col == b.col && row_diff(a, b) == 1
}

pub fn is_pawn_diagonal_step(a: Square, b: Square) -> bool {
    row_diff(a, b) == 1 && col_diff(a, b) == 1
}

/** Directions for sliding pieces, `(d_row, d_col)` */
pub const DIAGONAL_DIR: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const STRAIGHT_DIR: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (2, -1),
    (1, -2),
    (-2, 1),
    (-1, 2),
    (-2, -1),
    (-1, -2),
];

#[derive(Debug)]
pub struct DirectionIterator {
    position: Square,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (d_row, d_col) = self.direction;
        self.position = self.position.offset(d_row, d_col)?;
        Some(self.position)
    }
}

/** Squares from `position` (exclusive) to the board edge (inclusive). */
pub fn in_direction(position: Square, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position,
        direction,
    }
}

#[derive(Debug)]
pub struct BetweenIterator {
    current: Square,
    target: Square,
    step: (i8, i8),
}

impl Iterator for BetweenIterator {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let (d_row, d_col) = self.step;
        self.current = self.current.offset(d_row, d_col)?;
        if self.current == self.target {
            None
        } else {
            Some(self.current)
        }
    }
}

/** Squares strictly between `from` and `to`, or `None` if they don't share a line. */
pub fn between(from: Square, to: Square) -> Option<BetweenIterator> {
    if from == to || !(is_diagonal(from, to) || is_straight(from, to)) {
        return None;
    }
    Some(BetweenIterator {
        current: from,
        target: to,
        step: ((to.row - from.row).signum(), (to.col - from.col).signum()),
    })
}

const POS_TO_STRING: [[&str; 8]; 8] = [
    ["a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8"],
    ["a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7"],
    ["a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6"],
    ["a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5"],
    ["a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4"],
    ["a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3"],
    ["a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2"],
    ["a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1"],
];

/** Caller guarantees `pos` is on the board. */
pub fn pos_to_str(pos: Square) -> &'static str {
    POS_TO_STRING[pos.row as usize][pos.col as usize]
}
