use log::{debug, trace};

use crate::core::definitions::{Cell, Figure, IllegalMove, Move, MoveResult};
use crate::core::engine::{Board, PieceKind, RuleOptions, Side};
use crate::core::utils::{between, Square, KING_STEPS};

/// Restore token returned by [`Game::apply_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub played: Move,
    pub captured: Cell,
    /// King cache entry overwritten by the move, if a king moved.
    pub prior_king: Option<(Side, Square)>,
}

/// What an accepted move did to the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Quiet,
    Check,
    Checkmate { winner: Side },
}

/**
 * Board, turn and cached king squares of one game.
 * The king cache is updated on every mutation, it is never recomputed.
 */
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    white_king: Square,
    black_king: Square,
    options: RuleOptions,
}

impl Game {
    pub fn new(options: RuleOptions) -> Game {
        Game {
            board: Board::default(),
            side_to_move: Side::White,
            white_king: Square::new(7, 4),
            black_king: Square::new(0, 4),
            options,
        }
    }

    /** Game from an arbitrary position. `None` unless each side has exactly one king. */
    pub fn with_board(board: Board, side_to_move: Side, options: RuleOptions) -> Option<Game> {
        let white = Figure::new(PieceKind::King, Side::White);
        let black = Figure::new(PieceKind::King, Side::Black);
        if board.count(white) != 1 || board.count(black) != 1 {
            return None;
        }
        Some(Game {
            white_king: board.find_king(Side::White)?,
            black_king: board.find_king(Side::Black)?,
            board,
            side_to_move,
            options,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn king_square(&self, side: Side) -> Square {
        match side {
            Side::White => self.white_king,
            Side::Black => self.black_king,
        }
    }

    fn king_square_mut(&mut self, side: Side) -> &mut Square {
        match side {
            Side::White => &mut self.white_king,
            Side::Black => &mut self.black_king,
        }
    }

    /** Pre-move checks for `side` playing `_move`, first failure wins. */
    pub fn validate_move(&self, side: Side, _move: Move) -> MoveResult<()> {
        if !_move.in_bounds() {
            return Err(IllegalMove::OutOfBounds);
        }
        if _move.from == _move.to {
            return Err(IllegalMove::NullMove);
        }
        let figure = self
            .board
            .get(_move.from)
            .figure()
            .ok_or(IllegalMove::NoPieceAtSource)?;
        if figure.side != side {
            return Err(IllegalMove::WrongColorPiece(figure.side));
        }
        if self.side_to_move != side {
            return Err(IllegalMove::NotYourTurn);
        }
        if !self.board.shape_allows(figure, _move, self.options) {
            return Err(IllegalMove::IllegalShapeForPiece);
        }
        Ok(())
    }

    /** Unchecked board mutation, keeps the king cache in sync. */
    pub fn apply_move(&mut self, _move: Move) -> MoveRecord {
        let moving = self.board.get(_move.from);
        let captured = self.board.execute(_move);
        let prior_king = match moving.figure() {
            Some(Figure {
                kind: PieceKind::King,
                side,
            }) => {
                let king = self.king_square_mut(side);
                let prior = *king;
                *king = _move.to;
                Some((side, prior))
            }
            _ => None,
        };
        MoveRecord {
            played: _move,
            captured,
            prior_king,
        }
    }

    pub fn revert(&mut self, record: MoveRecord) {
        self.board.undo(record.played, record.captured);
        if let Some((side, square)) = record.prior_king {
            *self.king_square_mut(side) = square;
        }
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        self.board
            .is_square_attacked(self.king_square(side), side.opposite())
    }

    /**
     * Whether `checked` can get out of the check delivered by `last_move`:
     * by moving the king, capturing the piece that moved, or interposing.
     */
    pub fn can_escape_check(&mut self, checked: Side, last_move: Move) -> bool {
        self.can_king_move(checked)
            || self.can_capture_attacker(checked, last_move)
            || self.can_block(checked, last_move)
    }

    fn can_king_move(&mut self, side: Side) -> bool {
        let king = self.king_square(side);
        for (d_row, d_col) in KING_STEPS {
            let Some(target) = king.offset(d_row, d_col) else {
                continue;
            };
            match self.board.get(target).figure() {
                Some(figure) if figure.side == side || figure.kind == PieceKind::King => continue,
                _ => (),
            }
            let record = self.apply_move(Move::new(king, target));
            let still_checked = self.is_in_check(side);
            self.revert(record);
            if !still_checked {
                trace!("{side} king can escape to {target}");
                return true;
            }
        }
        false
    }

    fn can_capture_attacker(&self, side: Side, last_move: Move) -> bool {
        self.board.is_square_attacked(last_move.to, side)
    }

    fn can_block(&self, side: Side, last_move: Move) -> bool {
        let Some(mut path) = between(last_move.to, self.king_square(side)) else {
            return false;
        };
        path.any(|square| self.board.is_square_attacked(square, side))
    }

    /**
     * Full move pipeline for `side`: validation, application, self-check
     * rejection and check/checkmate resolution. On error the game is
     * unchanged.
     */
    pub fn make_move(&mut self, side: Side, _move: Move) -> MoveResult<MoveOutcome> {
        self.validate_move(side, _move)?;
        let record = self.apply_move(_move);
        if record.captured.side() == Some(side) {
            self.revert(record);
            return Err(IllegalMove::CannotCaptureOwnPiece);
        }
        // Kings are never captured
        if matches!(record.captured.figure(), Some(Figure { kind: PieceKind::King, .. })) {
            self.revert(record);
            return Err(IllegalMove::IllegalShapeForPiece);
        }
        if self.is_in_check(side) {
            self.revert(record);
            return Err(IllegalMove::MoveExposesOwnKingToCheck);
        }
        self.side_to_move = side.opposite();

        let opponent = side.opposite();
        if !self.is_in_check(opponent) {
            return Ok(MoveOutcome::Quiet);
        }
        debug!("{opponent} is checked by {_move}");
        if self.can_escape_check(opponent, _move) {
            Ok(MoveOutcome::Check)
        } else {
            Ok(MoveOutcome::Checkmate { winner: side })
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(RuleOptions::default())
    }
}
