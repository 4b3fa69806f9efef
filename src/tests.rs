use crate::core::game::MoveRecord;
use crate::core::protocol::ServerMessage;
use crate::core::session::{Outgoing, Recipient};
use crate::core::utils::{
    between, is_diagonal, is_king_step, is_knight_shape, is_pawn_diagonal_step,
    is_pawn_single_step, is_straight, Square,
};

use super::*;

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn token(text: &str) -> Move {
    Move::parse(text).expect("Token must be well formed")
}

fn board(rows: &str) -> Board {
    Board::from_rows(rows).expect("Board diagram must have 64 squares")
}

fn game(rows: &str, side_to_move: Side) -> Game {
    Game::with_board(board(rows), side_to_move, RuleOptions::default())
        .expect("Position must have one king per side")
}

const INITIAL_ROWS: &str = "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n";

#[test]
fn geometry() {
    assert!(is_diagonal(sq(7, 2), sq(4, 5)));
    assert!(!is_diagonal(sq(7, 2), sq(4, 4)));
    assert!(is_straight(sq(3, 0), sq(3, 7)));
    assert!(is_straight(sq(0, 5), sq(7, 5)));
    assert!(!is_straight(sq(0, 5), sq(7, 4)));
    assert!(is_king_step(sq(4, 4), sq(5, 5)));
    assert!(is_king_step(sq(4, 4), sq(4, 3)));
    assert!(!is_king_step(sq(4, 4), sq(6, 4)));
    assert!(is_knight_shape(sq(7, 1), sq(5, 2)));
    assert!(is_knight_shape(sq(7, 1), sq(6, 3)));
    assert!(!is_knight_shape(sq(7, 1), sq(5, 3)));
    assert!(is_pawn_single_step(sq(6, 0), sq(5, 0)));
    assert!(!is_pawn_single_step(sq(6, 0), sq(4, 0)));
    assert!(is_pawn_diagonal_step(sq(6, 3), sq(5, 4)));
    assert!(!is_pawn_diagonal_step(sq(6, 3), sq(4, 5)));
}

#[test]
fn squares_between() {
    let cells: Vec<_> = between(sq(0, 0), sq(3, 3)).expect("Diagonal").collect();
    assert_eq!(cells, vec![sq(1, 1), sq(2, 2)]);
    let cells: Vec<_> = between(sq(7, 4), sq(7, 1)).expect("Straight").collect();
    assert_eq!(cells, vec![sq(7, 3), sq(7, 2)]);
    assert_eq!(between(sq(4, 4), sq(5, 5)).expect("Adjacent").count(), 0);
    assert!(between(sq(2, 1), sq(0, 0)).is_none(), "Knight jump has no line");
}

#[test]
fn move_token_parsing() {
    assert_eq!(token("a2a4"), Move::new(sq(6, 0), sq(4, 0)));
    assert_eq!(token("h8g6"), Move::new(sq(0, 7), sq(2, 6)));
    assert_eq!(Move::parse("a2a"), Err(IllegalMove::MalformedMoveToken));
    assert_eq!(Move::parse("a2a45"), Err(IllegalMove::MalformedMoveToken));
    assert_eq!(Move::parse(""), Err(IllegalMove::MalformedMoveToken));
    assert!(!token("z9a1").in_bounds());
    assert_eq!(token("e2e4").to_string(), "e2e4");
}

#[test]
fn board_rendering() {
    assert_eq!(Board::default().render(), INITIAL_ROWS);
    assert_eq!(board(INITIAL_ROWS), Board::default());
    assert!(Board::from_rows("rnbqkbnr").is_none());
    assert!(Board::from_rows(&INITIAL_ROWS.replace('r', "x")).is_none());
}

#[test]
fn straight_attack_reaches_board_edge() {
    // Lone white rook on a1, black king on a8
    let board = board(
        "k.......
         ........
         ........
         ........
         ........
         ........
         ........
         R.......",
    );
    assert!(board.is_square_attacked(sq(0, 0), Side::White));
    assert!(!board.is_square_attacked(sq(0, 0), Side::Black));
}

#[test]
fn adjacent_attackers_on_edge_are_seen() {
    let board = board(
        "kR......
         .B......
         ........
         ........
         ........
         ........
         ........
         ........",
    );
    assert!(board.is_square_attacked(sq(0, 0), Side::White));
    let board_diag = Board::from_rows(&board.render().replace('R', ".")).expect("valid");
    assert!(board_diag.is_square_attacked(sq(0, 0), Side::White));
    let corner = Board::from_rows(
        ".......k
         ........
         ........
         ........
         ........
         ........
         ......q.
         .......K",
    )
    .expect("valid");
    assert!(corner.is_square_attacked(sq(7, 7), Side::Black));
}

#[test]
fn rays_stop_at_first_piece() {
    let board = board(
        "k.......
         ........
         ........
         P.......
         ........
         ........
         ........
         R......b",
    );
    assert!(!board.is_square_attacked(sq(0, 0), Side::White));
    // Own piece of the attacker blocks too
    assert!(!board.is_square_attacked(sq(2, 0), Side::White));
    assert!(board.is_square_attacked(sq(4, 0), Side::White));
    // Diagonal from h1 up to a8 is open
    assert!(board.is_square_attacked(sq(1, 1), Side::Black));
    assert!(!board.is_square_attacked(sq(1, 1), Side::White));
}

#[test]
fn knight_attacks() {
    let board = board(
        "........
         ........
         ........
         ........
         ........
         ........
         ........
         .N......",
    );
    for target in [sq(5, 0), sq(5, 2), sq(6, 3)] {
        assert!(board.is_square_attacked(target, Side::White), "{target}");
    }
    for target in [sq(6, 1), sq(5, 1), sq(4, 2), sq(6, 2)] {
        assert!(!board.is_square_attacked(target, Side::White), "{target}");
    }
}

#[test]
fn kings_and_pawns_are_not_scanned() {
    // Known limitation: only sliders and knights count as attackers.
    let board = board(
        "k.......
         .K......
         ........
         ........
         ...p....
         ....P...
         ........
         ........",
    );
    assert!(!board.is_square_attacked(sq(0, 0), Side::White));
    assert!(!board.is_square_attacked(sq(4, 3), Side::White));
    assert!(!board.is_square_attacked(sq(5, 4), Side::Black));
}

#[test]
fn lone_queen_check_can_be_escaped() {
    let mut game = game(
        "k...q...
         ........
         ........
         ........
         ........
         ........
         ........
         ....K...",
        Side::White,
    );
    assert!(game.is_in_check(Side::White));
    let before = game.board().clone();
    assert!(game.can_escape_check(Side::White, token("d8e8")));
    assert_eq!(game.board(), &before, "Escape search must leave the board intact");
    assert_eq!(game.king_square(Side::White), sq(7, 4));
}

#[test]
fn cornered_king_cannot_escape() {
    let mut game = game(
        "rr.....k
         ........
         ........
         ........
         ........
         ........
         ........
         K.......",
        Side::White,
    );
    assert!(game.is_in_check(Side::White));
    assert!(!game.can_escape_check(Side::White, token("b8a8")));
    assert_eq!(game.king_square(Side::White), sq(7, 0));
}

#[test]
fn check_detection_is_idempotent() {
    let game = game(
        "k...q...
         ........
         ........
         ........
         ........
         ........
         ........
         ....K...",
        Side::White,
    );
    let first = game.is_in_check(Side::White);
    assert_eq!(first, game.is_in_check(Side::White));
    assert_eq!(game.is_in_check(Side::Black), game.is_in_check(Side::Black));
}

#[test]
fn pawn_double_step_is_rejected() {
    let mut game = Game::default();
    assert_eq!(
        game.make_move(Side::White, token("a2a4")),
        Err(IllegalMove::IllegalShapeForPiece)
    );
    assert_eq!(game.board(), &Board::default());
    assert_eq!(game.side_to_move(), Side::White);
}

#[test]
fn knight_opening_move() {
    let mut game = Game::default();
    assert_eq!(game.make_move(Side::White, token("b1c3")), Ok(MoveOutcome::Quiet));
    assert_eq!(
        game.board().get(sq(5, 2)),
        Cell::Figure(Figure::new(PieceKind::Knight, Side::White))
    );
    assert_eq!(game.board().get(sq(7, 1)), Cell::Empty);
    assert_eq!(game.side_to_move(), Side::Black);
    assert!(!game.is_in_check(Side::Black));
}

#[test]
fn pawn_cannot_take_own_piece() {
    let rows = "....k...
                ........
                ........
                ........
                ........
                ....N...
                ...P....
                ....K...";
    let mut game = game(rows, Side::White);
    let d2e3 = token("d2e3");
    assert_eq!(game.validate_move(Side::White, d2e3), Ok(()));
    assert_eq!(
        game.make_move(Side::White, d2e3),
        Err(IllegalMove::CannotCaptureOwnPiece)
    );
    assert_eq!(game.board(), &board(rows));
    assert_eq!(game.side_to_move(), Side::White);
}

#[test]
fn pawn_diagonal_needs_a_target() {
    let mut game = game(
        "....k...
         ........
         ........
         ........
         ........
         ..n.....
         ...P....
         ....K...",
        Side::White,
    );
    assert_eq!(
        game.make_move(Side::White, token("d2e3")),
        Err(IllegalMove::IllegalShapeForPiece)
    );
    assert_eq!(game.make_move(Side::White, token("d2c3")), Ok(MoveOutcome::Quiet));
    assert_eq!(game.board().count(Figure::new(PieceKind::Knight, Side::Black)), 0);
}

#[test]
fn validation_order() {
    let mut game = Game::default();
    assert_eq!(
        game.validate_move(Side::White, token("i2a3")),
        Err(IllegalMove::OutOfBounds)
    );
    assert_eq!(
        game.validate_move(Side::White, token("a2a2")),
        Err(IllegalMove::NullMove)
    );
    assert_eq!(
        game.validate_move(Side::White, token("a3a4")),
        Err(IllegalMove::NoPieceAtSource)
    );
    assert_eq!(
        game.validate_move(Side::White, token("a7a6")),
        Err(IllegalMove::WrongColorPiece(Side::Black))
    );
    assert_eq!(
        game.validate_move(Side::Black, token("a7a6")),
        Err(IllegalMove::NotYourTurn)
    );
    // Wrong colour is reported before turn order
    assert_eq!(
        game.validate_move(Side::Black, token("a2a3")),
        Err(IllegalMove::WrongColorPiece(Side::White))
    );
    assert_eq!(
        game.validate_move(Side::White, token("c1c3")),
        Err(IllegalMove::IllegalShapeForPiece)
    );
    assert_eq!(game.make_move(Side::White, token("a2a3")), Ok(MoveOutcome::Quiet));
    assert_eq!(
        game.validate_move(Side::White, token("b2b3")),
        Err(IllegalMove::NotYourTurn)
    );
}

#[test]
fn error_texts() {
    assert_eq!(
        IllegalMove::WrongColorPiece(Side::Black).to_string(),
        "You can't move black's pieces!"
    );
    assert_eq!(
        IllegalMove::WrongColorPiece(Side::White).to_string(),
        "You can't move white's pieces!"
    );
    assert_eq!(
        ServerMessage::from(IllegalMove::MalformedMoveToken).to_string(),
        "e Invalid move format! Use format: a2a4\n"
    );
    assert_eq!(
        ServerMessage::from(IllegalMove::NotYourTurn).to_string(),
        "e Not your turn!\n"
    );
}

#[test]
fn pawn_direction_is_not_checked_by_default() {
    // Differs from chess rules: pawns may step backwards unless strict mode is on.
    let rows = "....k...
                ........
                ........
                ........
                P.......
                ........
                ........
                ....K...";
    let mut lenient = game(rows, Side::White);
    assert_eq!(lenient.make_move(Side::White, token("a4a3")), Ok(MoveOutcome::Quiet));

    let strict = RuleOptions {
        enforce_pawn_direction: true,
    };
    let mut strict = Game::with_board(board(rows), Side::White, strict).expect("valid");
    assert_eq!(
        strict.make_move(Side::White, token("a4a3")),
        Err(IllegalMove::IllegalShapeForPiece)
    );
    assert_eq!(strict.make_move(Side::White, token("a4a5")), Ok(MoveOutcome::Quiet));
}

#[test]
fn sliding_moves_ignore_intermediate_squares() {
    // Shape legality doesn't look at the path, the rook jumps its own pawn.
    let mut game = Game::default();
    assert_eq!(game.make_move(Side::White, token("a1a3")), Ok(MoveOutcome::Quiet));
    assert_eq!(
        game.board().get(sq(5, 0)),
        Cell::Figure(Figure::new(PieceKind::Rook, Side::White))
    );
}

#[test]
fn pinned_piece_cannot_move() {
    let rows = "k...r...
                ........
                ........
                ........
                ........
                ........
                ....B...
                ....K...";
    let mut game = game(rows, Side::White);
    assert_eq!(
        game.make_move(Side::White, token("e2d3")),
        Err(IllegalMove::MoveExposesOwnKingToCheck)
    );
    assert_eq!(game.board(), &board(rows));
    assert_eq!(game.side_to_move(), Side::White);
    assert_eq!(game.king_square(Side::White), sq(7, 4));
}

#[test]
fn king_cannot_step_into_attack() {
    let rows = "k..r....
                ........
                ........
                ........
                ........
                ........
                ........
                ....K...";
    let mut game = game(rows, Side::White);
    assert_eq!(
        game.make_move(Side::White, token("e1d1")),
        Err(IllegalMove::MoveExposesOwnKingToCheck)
    );
    assert_eq!(game.king_square(Side::White), sq(7, 4));
    assert_eq!(game.board(), &board(rows));
    assert_eq!(game.make_move(Side::White, token("e1f1")), Ok(MoveOutcome::Quiet));
    assert_eq!(game.king_square(Side::White), sq(7, 5));
}

#[test]
fn apply_and_revert_restore_everything() {
    let mut game = game(
        "....k...
         ........
         ........
         ........
         ........
         ........
         ...q....
         ....K...",
        Side::White,
    );
    let before = game.clone();
    let record: MoveRecord = game.apply_move(token("e1d2"));
    assert_eq!(record.captured, Cell::Figure(Figure::new(PieceKind::Queen, Side::Black)));
    assert_eq!(record.prior_king, Some((Side::White, sq(7, 4))));
    assert_eq!(game.king_square(Side::White), sq(6, 3));
    game.revert(record);
    assert_eq!(game.board(), before.board());
    assert_eq!(game.king_square(Side::White), before.king_square(Side::White));
    assert_eq!(game.king_square(Side::Black), before.king_square(Side::Black));
}

#[test]
fn quiet_moves_keep_material() {
    let mut game = Game::default();
    for (side, mv) in [
        (Side::White, "e2e3"),
        (Side::Black, "g8f6"),
        (Side::White, "f1c4"),
        (Side::Black, "e7e6"),
    ] {
        let before = game.board().clone();
        assert_eq!(game.make_move(side, token(mv)), Ok(MoveOutcome::Quiet), "{mv}");
        for kind in PieceKind::KINDS {
            for owner in [Side::White, Side::Black] {
                let figure = Figure::new(kind, owner);
                assert_eq!(before.count(figure), game.board().count(figure), "{mv}");
            }
        }
    }
}

#[test]
fn escapable_check() {
    let mut game = game(
        "....k...
         ........
         ........
         ........
         ........
         ........
         ........
         R...K...",
        Side::White,
    );
    assert_eq!(game.make_move(Side::White, token("a1a8")), Ok(MoveOutcome::Check));
    assert!(game.is_in_check(Side::Black));
    assert_eq!(game.side_to_move(), Side::Black);
}

#[test]
fn back_rank_mate() {
    let mut game = game(
        "......k.
         .....ppp
         ........
         ........
         ........
         ........
         ........
         R...K...",
        Side::White,
    );
    assert_eq!(
        game.make_move(Side::White, token("a1a8")),
        Ok(MoveOutcome::Checkmate {
            winner: Side::White
        })
    );
    assert_eq!(game.king_square(Side::Black), sq(0, 6));
}

#[test]
fn back_rank_check_can_be_blocked() {
    let mut game = game(
        "......k.
         .....ppp
         ...r....
         ........
         ........
         ........
         ........
         R...K...",
        Side::White,
    );
    assert_eq!(game.make_move(Side::White, token("a1a8")), Ok(MoveOutcome::Check));
}

#[test]
fn back_rank_checker_can_be_captured() {
    let mut game = game(
        "......k.
         .....ppp
         .n......
         ........
         ........
         ........
         ........
         R...K...",
        Side::White,
    );
    assert_eq!(game.make_move(Side::White, token("a1a8")), Ok(MoveOutcome::Check));
}

#[test]
fn smothered_mate() {
    // Knight checks can't be blocked
    let mut game = game(
        "......rk
         ......pp
         ........
         ....N...
         ........
         ........
         ........
         ....K...",
        Side::White,
    );
    assert_eq!(
        game.make_move(Side::White, token("e5f7")),
        Ok(MoveOutcome::Checkmate {
            winner: Side::White
        })
    );
}

#[test]
fn invalid_positions_are_refused() {
    let no_black_king = board(
        "........
         ........
         ........
         ........
         ........
         ........
         ........
         ....K...",
    );
    assert!(Game::with_board(no_black_king, Side::White, RuleOptions::default()).is_none());
    let two_white_kings = board(
        "....k...
         ........
         ........
         ........
         ........
         ........
         ........
         ...KK...",
    );
    assert!(Game::with_board(two_white_kings, Side::White, RuleOptions::default()).is_none());
}

fn active_session(game: Game) -> Session {
    let mut session = Session::with_game(4, game);
    session.connect(Side::White);
    session.connect(Side::Black);
    assert_eq!(session.state(), SessionState::Active);
    session
}

#[test]
fn session_pairing() {
    let mut session = Session::new(2, RuleOptions::default());
    let board = ServerMessage::Board {
        game_id: 2,
        rows: INITIAL_ROWS.to_string(),
    };
    assert_eq!(
        session.connect(Side::White),
        vec![
            Outgoing::Send(
                Recipient::Player(Side::White),
                ServerMessage::Welcome {
                    side: Side::White,
                    game_id: 2
                }
            ),
            Outgoing::Send(Recipient::Player(Side::White), board.clone()),
        ]
    );
    assert_eq!(session.state(), SessionState::AwaitingOpponent);
    assert_eq!(
        session.handle_line(Side::White, "e2e3"),
        vec![Outgoing::Send(
            Recipient::Player(Side::White),
            ServerMessage::error("Game not started!")
        )]
    );
    assert_eq!(
        session.connect(Side::Black),
        vec![
            Outgoing::Send(
                Recipient::Player(Side::Black),
                ServerMessage::Welcome {
                    side: Side::Black,
                    game_id: 2
                }
            ),
            Outgoing::Send(Recipient::Player(Side::Black), board),
            Outgoing::Send(Recipient::Both, ServerMessage::GameStarting { game_id: 2 }),
        ]
    );
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn session_move_replies() {
    let mut session = active_session(Game::default());
    assert_eq!(
        session.handle_line(Side::White, "e2e4"),
        vec![Outgoing::Send(
            Recipient::Player(Side::White),
            IllegalMove::IllegalShapeForPiece.into()
        )]
    );
    assert_eq!(
        session.handle_line(Side::White, "e2"),
        vec![Outgoing::Send(
            Recipient::Player(Side::White),
            IllegalMove::MalformedMoveToken.into()
        )]
    );
    let replies = session.handle_line(Side::White, "e2e3\r\n");
    assert_eq!(replies.len(), 1);
    assert!(matches!(
        &replies[0],
        Outgoing::Send(Recipient::Both, ServerMessage::Board { game_id: 4, rows })
            if rows.lines().nth(5) == Some("....P...")
    ));
    assert_eq!(session.game().side_to_move(), Side::Black);
}

#[test]
fn session_resyncs_after_self_check() {
    let mut session = active_session(game(
        "k...r...
         ........
         ........
         ........
         ........
         ........
         ....B...
         ....K...",
        Side::White,
    ));
    let replies = session.handle_line(Side::White, "e2d3");
    assert_eq!(
        replies,
        vec![
            Outgoing::Send(
                Recipient::Player(Side::White),
                IllegalMove::MoveExposesOwnKingToCheck.into()
            ),
            Outgoing::Send(
                Recipient::Player(Side::White),
                ServerMessage::board(4, session.game().board())
            ),
        ]
    );
}

#[test]
fn session_check_and_mate() {
    let mut session = active_session(game(
        "......k.
         .....ppp
         ........
         ........
         ........
         ........
         ........
         R...K...",
        Side::White,
    ));
    let replies = session.handle_line(Side::White, "a1a8");
    let board = ServerMessage::board(4, session.game().board());
    assert_eq!(
        replies,
        vec![
            Outgoing::Send(Recipient::Both, board),
            Outgoing::Send(Recipient::Player(Side::White), ServerMessage::Won),
            Outgoing::Send(Recipient::Player(Side::Black), ServerMessage::Lost),
            Outgoing::Close(Recipient::Both),
        ]
    );
    assert!(session.is_finished());
    assert_eq!(
        session.handle_line(Side::Black, "g8h8"),
        vec![Outgoing::Send(
            Recipient::Player(Side::Black),
            ServerMessage::error("Game is over!")
        )]
    );

    let mut session = active_session(game(
        "....k...
         ........
         ........
         ........
         ........
         ........
         ........
         R...K...",
        Side::White,
    ));
    let replies = session.handle_line(Side::White, "a1a8");
    assert_eq!(replies[0], Outgoing::Send(Recipient::Both, ServerMessage::Check));
    assert!(matches!(replies[1], Outgoing::Send(Recipient::Both, ServerMessage::Board { .. })));
    assert!(!session.is_finished());
}

#[test]
fn session_disconnects() {
    let mut waiting = Session::new(0, RuleOptions::default());
    waiting.connect(Side::White);
    waiting.disconnect(Side::White);
    assert!(waiting.is_finished());

    let mut session = active_session(Game::default());
    assert_eq!(
        session.disconnect(Side::Black),
        vec![
            Outgoing::Send(
                Recipient::Player(Side::White),
                ServerMessage::OpponentDisconnected
            ),
            Outgoing::Close(Recipient::Both),
        ]
    );
    assert!(session.is_finished());
    assert!(session.disconnect(Side::White).is_empty());
    assert!(session.shutdown().is_empty());
}

#[test]
fn session_shutdown() {
    let mut session = active_session(Game::default());
    assert_eq!(
        session.shutdown(),
        vec![
            Outgoing::Send(Recipient::Both, ServerMessage::ShuttingDown),
            Outgoing::Close(Recipient::Both),
        ]
    );
    assert!(session.is_finished());
}

#[test]
fn wire_texts() {
    assert_eq!(
        ServerMessage::board(3, &Board::default()).to_string(),
        format!("\nGame #3\nboard {INITIAL_ROWS}")
    );
    assert_eq!(
        ServerMessage::Welcome {
            side: Side::White,
            game_id: 0
        }
        .to_string(),
        "Welcome! You are Player White in Game #0. Waiting for opponent...\n"
    );
    assert_eq!(
        ServerMessage::Welcome {
            side: Side::Black,
            game_id: 0
        }
        .to_string(),
        "Welcome! You are Player Black in Game #0\n"
    );
    assert_eq!(ServerMessage::Check.to_string(), "Check!\n");
    assert_eq!(ServerMessage::Won.to_string(), "You win! Game over.\n");
    assert_eq!(ServerMessage::Lost.to_string(), "You lost. Game over.\n");
    assert_eq!(
        ServerMessage::OpponentDisconnected.to_string(),
        "x Opponent disconnected. Game over.\n"
    );
}

#[test]
fn king_cannot_be_captured_by_king() {
    let mut game = game(
        "k.......
         ........
         ..K.....
         ........
         ........
         ........
         ........
         ........",
        Side::White,
    );
    assert_eq!(game.make_move(Side::White, token("c6b7")), Ok(MoveOutcome::Quiet));
    let before = game.board().clone();
    assert_eq!(
        game.make_move(Side::Black, token("a8b7")),
        Err(IllegalMove::IllegalShapeForPiece)
    );
    assert_eq!(game.board(), &before);
    assert_eq!(game.side_to_move(), Side::Black);
    assert_eq!(game.king_square(Side::White), sq(1, 1));
    assert_eq!(game.king_square(Side::Black), sq(0, 0));
    assert_eq!(game.board().count(Figure::new(PieceKind::King, Side::White)), 1);
}

#[test]
fn king_cannot_be_captured_by_pawn() {
    let rows = "........
                ........
                ........
                ........
                ........
                ...k....
                ....P...
                K.......";
    let mut game = game(rows, Side::White);
    assert_eq!(
        game.make_move(Side::White, token("e2d3")),
        Err(IllegalMove::IllegalShapeForPiece)
    );
    assert_eq!(game.board(), &board(rows));
    assert_eq!(game.king_square(Side::Black), sq(5, 3));
    assert_eq!(game.side_to_move(), Side::White);
}
