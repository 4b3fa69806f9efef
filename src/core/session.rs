use log::{debug, info, trace, warn};

use crate::core::definitions::{IllegalMove, Move};
use crate::core::engine::{RuleOptions, Side};
use crate::core::game::{Game, MoveOutcome};
use crate::core::protocol::{GameId, ServerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingOpponent,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Player(Side),
    Both,
}

impl Recipient {
    pub fn includes(self, side: Side) -> bool {
        match self {
            Recipient::Player(player) => player == side,
            Recipient::Both => true,
        }
    }
}

/// Effects a session asks the connection layer to carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Send(Recipient, ServerMessage),
    Close(Recipient),
}

/**
 * One two-player game: state machine around a [`Game`].
 * Every input returns the messages to deliver; the session never does IO.
 */
#[derive(Debug)]
pub struct Session {
    id: GameId,
    state: SessionState,
    game: Game,
}

impl Session {
    pub fn new(id: GameId, options: RuleOptions) -> Session {
        Session::with_game(id, Game::new(options))
    }

    pub fn with_game(id: GameId, game: Game) -> Session {
        Session {
            id,
            state: SessionState::AwaitingOpponent,
            game,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    fn board_message(&self) -> ServerMessage {
        ServerMessage::board(self.id, self.game.board())
    }

    /** Player of `side` took its seat. White opens the game, black starts it. */
    pub fn connect(&mut self, side: Side) -> Vec<Outgoing> {
        if self.state != SessionState::AwaitingOpponent {
            warn!(
                "Game #{} got {} connection in state {:?}",
                self.id, side, self.state
            );
            return Vec::new();
        }
        let mut out = vec![
            Outgoing::Send(
                Recipient::Player(side),
                ServerMessage::Welcome {
                    side,
                    game_id: self.id,
                },
            ),
            Outgoing::Send(Recipient::Player(side), self.board_message()),
        ];
        match side {
            Side::White => trace!("Game #{} is waiting for opponent", self.id),
            Side::Black => {
                self.state = SessionState::Active;
                info!("Game #{} is starting", self.id);
                out.push(Outgoing::Send(
                    Recipient::Both,
                    ServerMessage::GameStarting { game_id: self.id },
                ));
            }
        }
        out
    }

    /** Raw line received from the player of `side`. */
    pub fn handle_line(&mut self, side: Side, line: &str) -> Vec<Outgoing> {
        let reply = |message: ServerMessage| vec![Outgoing::Send(Recipient::Player(side), message)];
        match self.state {
            SessionState::AwaitingOpponent => return reply(ServerMessage::error("Game not started!")),
            SessionState::Finished => return reply(ServerMessage::error("Game is over!")),
            SessionState::Active => (),
        }
        let token = line.trim();
        trace!("Game #{} {} player sent {:?}", self.id, side, token);
        let outcome = Move::parse(token).and_then(|_move| {
            self.game
                .make_move(side, _move)
                .map(|outcome| (_move, outcome))
        });
        match outcome {
            Err(IllegalMove::MoveExposesOwnKingToCheck) => {
                debug!("Game #{} {} move {} exposes own king", self.id, side, token);
                let mut out = reply(IllegalMove::MoveExposesOwnKingToCheck.into());
                out.push(Outgoing::Send(Recipient::Player(side), self.board_message()));
                out
            }
            Err(reason) => {
                debug!("Game #{} {} move {:?} refused: {:?}", self.id, side, token, reason);
                reply(reason.into())
            }
            Ok((_move, MoveOutcome::Quiet)) => {
                trace!("Game #{} {} played {}", self.id, side, _move);
                vec![Outgoing::Send(Recipient::Both, self.board_message())]
            }
            Ok((_move, MoveOutcome::Check)) => {
                debug!("Game #{} {} played {} with check", self.id, side, _move);
                vec![
                    Outgoing::Send(Recipient::Both, ServerMessage::Check),
                    Outgoing::Send(Recipient::Both, self.board_message()),
                ]
            }
            Ok((_move, MoveOutcome::Checkmate { winner })) => {
                info!("Game #{} {} won by checkmate with {}", self.id, winner, _move);
                self.state = SessionState::Finished;
                vec![
                    Outgoing::Send(Recipient::Both, self.board_message()),
                    Outgoing::Send(Recipient::Player(winner), ServerMessage::Won),
                    Outgoing::Send(Recipient::Player(winner.opposite()), ServerMessage::Lost),
                    Outgoing::Close(Recipient::Both),
                ]
            }
        }
    }

    /** Player of `side` is gone; the game ends in any state. */
    pub fn disconnect(&mut self, side: Side) -> Vec<Outgoing> {
        let previous = std::mem::replace(&mut self.state, SessionState::Finished);
        match previous {
            SessionState::AwaitingOpponent => {
                info!("Game #{} closed before opponent joined", self.id);
                vec![Outgoing::Close(Recipient::Player(side))]
            }
            SessionState::Active => {
                info!("Game #{} {} player disconnected", self.id, side);
                vec![
                    Outgoing::Send(
                        Recipient::Player(side.opposite()),
                        ServerMessage::OpponentDisconnected,
                    ),
                    Outgoing::Close(Recipient::Both),
                ]
            }
            SessionState::Finished => Vec::new(),
        }
    }

    /** Server is going down. */
    pub fn shutdown(&mut self) -> Vec<Outgoing> {
        if self.is_finished() {
            return Vec::new();
        }
        self.state = SessionState::Finished;
        vec![
            Outgoing::Send(Recipient::Both, ServerMessage::ShuttingDown),
            Outgoing::Close(Recipient::Both),
        ]
    }
}
