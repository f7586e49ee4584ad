use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use shared::{
    domain::PlayerId,
    protocol::{decode_line, encode_line, ClientRequest, ServerEvent, MAX_LINE_LEN},
};
use tokio::{
    net::{tcp::OwnedWriteHalf, TcpStream},
    sync::{mpsc::UnboundedReceiver, Mutex},
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, warn};

use crate::app_state::Room;

pub(crate) async fn run(
    room: Arc<Mutex<Room>>,
    player: PlayerId,
    stream: TcpStream,
    outbound: UnboundedReceiver<ServerEvent>,
) {
    let (reader, writer) = stream.into_split();
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    let sink = FramedWrite::new(writer, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    let send_task = tokio::spawn(write_events(player, sink, outbound));

    while let Some(frame) = lines.next().await {
        let line = match frame {
            Ok(line) => line,
            Err(error) => {
                warn!(%player, %error, "unreadable input, closing connection");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let request = match decode_line::<ClientRequest>(&line) {
            Ok(request) => request,
            Err(error) => {
                warn!(%player, %error, "malformed message, closing connection");
                break;
            }
        };

        room.lock().await.apply(player, &request);
    }

    // Dropping the sender lets the writer drain what is queued and finish.
    room.lock().await.leave(player);
    drop(lines);
    if let Err(error) = send_task.await {
        warn!(%player, %error, "writer task failed");
    }
    info!(%player, "player disconnected");
}

async fn write_events(
    player: PlayerId,
    mut sink: FramedWrite<OwnedWriteHalf, LinesCodec>,
    mut outbound: UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = outbound.recv().await {
        let line = match encode_line(&event) {
            Ok(line) => line,
            Err(error) => {
                warn!(%player, event = event.kind(), %error, "failed to encode event");
                continue;
            }
        };
        if let Err(error) = sink.send(line).await {
            debug!(%player, %error, "send failed, dropping outbound stream");
            break;
        }
    }
}
