use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::core::engine::{Board, Side};
use crate::online_game::definitions::*;

/** `[a-h][1-8][a-h][1-8]`, checked before anything is sent. */
pub fn is_move_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 4
        && bytes
            .chunks(2)
            .all(|pair| (b'a'..=b'h').contains(&pair[0]) && (b'1'..=b'8').contains(&pair[1]))
}

/// One thing the server told us, after line reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Welcome { side: Side, text: String },
    Board(Board),
    Error(String),
    GameOver(String),
    Status(String),
}

/**
 * Turns server lines into [`ServerEvent`]s.
 * A board arrives as `board <row>` plus seven more rows and is only
 * reported once complete.
 */
#[derive(Debug, Default)]
pub struct EventParser {
    rows: Option<Vec<String>>,
}

impl EventParser {
    pub fn feed(&mut self, line: &str) -> Option<ServerEvent> {
        let line = line.trim_end();
        if let Some(rows) = self.rows.as_mut() {
            rows.push(line.to_string());
            if rows.len() < 8 {
                return None;
            }
            let rows = self.rows.take()?.join("\n");
            return match Board::from_rows(&rows) {
                Some(board) => Some(ServerEvent::Board(board)),
                None => {
                    warn!("Malformed board from server:\n{}", rows);
                    None
                }
            };
        }
        if let Some(first) = line.strip_prefix("board ") {
            self.rows = Some(vec![first.to_string()]);
            return None;
        }
        if let Some(reason) = line.strip_prefix("e ") {
            return Some(ServerEvent::Error(reason.to_string()));
        }
        if let Some(reason) = line.strip_prefix("x ") {
            return Some(ServerEvent::GameOver(reason.to_string()));
        }
        if line.ends_with("Game over.") {
            return Some(ServerEvent::GameOver(line.to_string()));
        }
        if line.starts_with("Welcome!") {
            let side = if line.contains("Player Black") {
                Side::Black
            } else {
                Side::White
            };
            return Some(ServerEvent::Welcome {
                side,
                text: line.to_string(),
            });
        }
        if line.is_empty() {
            return None;
        }
        Some(ServerEvent::Status(line.to_string()))
    }
}

/** Board with rank and file labels, seen from `side`. */
pub fn draw_board(board: &Board, side: Side) -> String {
    let rendered = board.render();
    let mut lines: Vec<(usize, &str)> = rendered.lines().enumerate().collect();
    let mut files: Vec<char> = ('a'..='h').collect();
    if side == Side::Black {
        lines.reverse();
        files.reverse();
    }
    let mut out = String::new();
    for (row, line) in lines {
        let mut cells: Vec<char> = line.chars().collect();
        if side == Side::Black {
            cells.reverse();
        }
        out.push_str(&format!("{} ", 8 - row));
        out.extend(cells);
        out.push('\n');
    }
    out.push_str("  ");
    out.extend(files);
    out.push('\n');
    out
}

/**
 * Plays one game over `stream`: server events are printed to `out`,
 * tokens read from `input` are checked locally and forwarded.
 * Returns when either side closes.
 */
pub async fn run_client<S, I, W>(stream: S, input: I, mut out: W) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut server = BufReader::new(read_half).lines();
    let mut input = input.lines();
    let mut parser = EventParser::default();
    let mut side = Side::White;
    let mut input_open = true;

    loop {
        tokio::select! {
            line = server.next_line() => {
                let Some(line) = line? else {
                    writeln!(out, "Connection closed by server")?;
                    break;
                };
                trace!("Server: {:?}", line);
                match parser.feed(&line) {
                    Some(ServerEvent::Welcome { side: seat, text }) => {
                        side = seat;
                        writeln!(out, "{text}")?;
                    }
                    Some(ServerEvent::Board(board)) => write!(out, "{}", draw_board(&board, side))?,
                    Some(ServerEvent::Error(reason)) => writeln!(out, "Error: {reason}")?,
                    Some(ServerEvent::GameOver(reason)) => writeln!(out, "{reason}")?,
                    Some(ServerEvent::Status(text)) => writeln!(out, "{text}")?,
                    None => (),
                }
            }
            token = input.next_line(), if input_open => {
                let Some(token) = token? else {
                    debug!("Input closed");
                    input_open = false;
                    write_half.shutdown().await?;
                    continue;
                };
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                if !is_move_token(token) {
                    writeln!(out, "Invalid move format, expected something like e2e4")?;
                    continue;
                }
                debug!("Sending move {}", token);
                write_half.write_all(format!("{token}\n").as_bytes()).await?;
            }
        }
        out.flush()?;
    }
    out.flush()
}
