use anyhow::Context;
use chess_session::online_game::{client::run_client, config::ClientConfig};
use clap::Parser;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use tokio::io::BufReader;
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ClientConfig::parse();
    debug!("Config: {:?}", config);

    let stream = TcpStream::connect((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to connect to {}:{}", config.host, config.port))?;
    info!("Connected to {}:{}", config.host, config.port);
    println!("Enter moves like e2e4, Ctrl-D to leave.");

    run_client(stream, BufReader::new(tokio::io::stdin()), std::io::stdout())
        .await
        .context("Connection to server failed")
}
