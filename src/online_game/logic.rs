use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::core::definitions::IllegalMove;
use crate::core::engine::{RuleOptions, Side};
use crate::core::protocol::{GameId, ServerMessage};
use crate::core::session::{Outgoing, Recipient, Session};
use crate::online_game::definitions::*;

async fn client_writer(receiver: UnboundedReceiver<Packet>, mut socket: OwnedWriteHalf) {
    let mut packets = UnboundedReceiverStream::new(receiver);
    while let Some(packet) = packets.next().await {
        match packet {
            Packet::Text(text) => {
                if let Err(err) = socket.write_all(text.as_bytes()).await {
                    error!("Failed sending msg to client: {}", err);
                    break;
                }
            }
            Packet::Close => break,
        }
    }
    let _ = socket.shutdown().await;
}

pub async fn client_connection(stream: TcpStream, rooms: Rooms, options: RuleOptions) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| String::from("unknown"));
    let (read_half, write_half) = stream.into_split();
    let (client_sender, client_rcv) = mpsc::unbounded_channel();
    let writer = tokio::task::spawn(client_writer(client_rcv, write_half));

    let id = Uuid::new_v4();
    let (sender, player, game_id) = {
        // Adding new client to a game
        let mut rooms_l = rooms.write().await;
        let mut client = Client {
            id,
            sender: client_sender.clone(),
            game_id: 0,
            side: Side::Black,
            writer: Some(writer),
        };
        let seated = match rooms_l.find_waiting() {
            Some(game_id) => {
                client.game_id = game_id;
                rooms_l
                    .seat(client)
                    .map(|sender| (sender, Side::Black, game_id))
            }
            None => match rooms_l.free_slot() {
                Some(game_id) => {
                    client.game_id = game_id;
                    client.side = Side::White;
                    let (sender, receiver) = mpsc::unbounded_channel();
                    rooms_l.open(OnlineGame {
                        id: game_id,
                        sender: sender.clone(),
                        white: Some(client),
                        black: None,
                        closing: false,
                    });
                    trace!("Created new game #{} for client {}", game_id, id);
                    tokio::task::spawn(game_handler(receiver, rooms.clone(), game_id, options));
                    Some((sender, Side::White, game_id))
                }
                None => None,
            },
        };
        let Some((sender, player, game_id)) = seated else {
            warn!("Refused client {} from {}: server is full", id, peer);
            let _ = client_sender.send(ServerMessage::error("Server is full!").into());
            let _ = client_sender.send(Packet::Close);
            return;
        };
        // Sent under the lock so white's seat is announced before black's.
        let _ = sender.send((player, ClientMessage::Connected));
        (sender, player, game_id)
    };
    debug!("Client {} from {} plays {} in game #{}", id, peer, player, game_id);

    let mut lines = BufReader::new(read_half).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = client_sender.closed() => {
                trace!("Client {} was closed by server", id);
                break;
            }
        };
        match line {
            Ok(Some(line)) => client_line(&rooms, id, &client_sender, line).await,
            Ok(None) => break,
            Err(err) => {
                error!("Failed receiving msg from client {}: {}", id, err);
                break;
            }
        }
    }

    {
        // Closed under the lock so nobody is seated against a leaving player.
        let mut rooms_l = rooms.write().await;
        rooms_l.close_for(id);
        let _ = sender.send((player, ClientMessage::Disconnect));
    }
    trace!("Client {} was disconnected...", id);
}

pub(crate) async fn client_line(
    rooms: &Rooms,
    id: Uuid,
    own: &UnboundedSender<Packet>,
    line: String,
) {
    let delivered = match rooms.read().await.lookup(id) {
        Some((game, side)) => game.sender.send((side, ClientMessage::MakeMove(line))).is_ok(),
        None => false,
    };
    if !delivered {
        warn!("Client {} sent a move without a game", id);
        let _ = own.send(ServerMessage::from(IllegalMove::GameNotFound).into());
    }
}

pub async fn game_handler(
    mut receiver: UnboundedReceiver<(Side, ClientMessage)>,
    rooms: Rooms,
    game_id: GameId,
    options: RuleOptions,
) {
    let mut session = Session::new(game_id, options);
    while let Some((player, message)) = receiver.recv().await {
        let outgoing = match message {
            ClientMessage::Connected => session.connect(player),
            ClientMessage::MakeMove(line) => session.handle_line(player, &line),
            ClientMessage::Disconnect => session.disconnect(player),
            ClientMessage::Shutdown => session.shutdown(),
        };
        if session.is_finished() {
            rooms.write().await.mark_closing(game_id);
        }
        dispatch(&rooms, game_id, outgoing).await;
        if session.is_finished() {
            receiver.close();
            break;
        }
    }
    match rooms.write().await.remove(game_id) {
        Some(room) => {
            // Anyone still seated is dropped with the room.
            send_packet(&room, Recipient::Both, Packet::Close);
            trace!("Deleted game #{}", game_id);
        }
        None => error!("Failed to find game #{}", game_id),
    }
}

async fn dispatch(rooms: &Rooms, game_id: GameId, outgoing: Vec<Outgoing>) {
    if outgoing.is_empty() {
        return;
    }
    if let Some(room) = rooms.read().await.get(game_id) {
        for effect in outgoing {
            let (recipient, packet) = match effect {
                Outgoing::Send(recipient, message) => (recipient, Packet::from(message)),
                Outgoing::Close(recipient) => (recipient, Packet::Close),
            };
            send_packet(room, recipient, packet);
        }
    }
}

fn send_packet(room: &OnlineGame, recipient: Recipient, packet: Packet) {
    match (recipient, packet) {
        (Recipient::Player(side), packet) => {
            if let Some(client) = room.get_player(side) {
                let _ = client.sender.send(packet);
            }
        }
        (Recipient::Both, Packet::Text(text)) => {
            for side in [Side::White, Side::Black] {
                send_packet(room, Recipient::Player(side), Packet::Text(text.clone()));
            }
        }
        (Recipient::Both, Packet::Close) => {
            for side in [Side::White, Side::Black] {
                send_packet(room, Recipient::Player(side), Packet::Close);
            }
        }
    }
}
