use std::net::SocketAddr;

use clap::Parser;

use crate::core::engine::RuleOptions;

/// Chess server pairing TCP clients into two-player games.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: std::net::IpAddr,

    /// Maximum number of simultaneous games
    #[arg(long, default_value_t = 50)]
    pub max_games: usize,

    /// Reject pawn moves that don't go towards the opponent
    #[arg(long)]
    pub strict_pawn_direction: bool,

    /// Game clock in seconds (accepted, clocks are not implemented)
    #[arg(long)]
    pub game_time: Option<u64>,

    /// Clock increment in seconds (accepted, clocks are not implemented)
    #[arg(long)]
    pub increment: Option<u64>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            enforce_pawn_direction: self.strict_pawn_direction,
        }
    }
}

/// Terminal client for the chess server.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct ClientConfig {
    /// Server host name or address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,
}
