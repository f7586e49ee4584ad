use futures::{SinkExt, StreamExt};
use shared::protocol::{decode_line, encode_line, ClientRequest, ServerEvent, MAX_LINE_LEN};
use tokio::{
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

use crate::{error::ClientError, ClientEvent};

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct GameClient {
    outbound: mpsc::UnboundedSender<String>,
    events: broadcast::Sender<ClientEvent>,
    reader_task: JoinHandle<()>,
    writer_task: JoinHandle<()>,
}

impl GameClient {
    /// Connect and start reading. The returned receiver is subscribed before
    /// the first byte is read, so it sees `player_id`.
    pub async fn connect(
        addr: &str,
    ) -> Result<(Self, broadcast::Receiver<ClientEvent>), ClientError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| ClientError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        info!(%addr, "connected to game server");
        Ok(Self::from_stream(stream))
    }

    pub fn from_stream(stream: TcpStream) -> (Self, broadcast::Receiver<ClientEvent>) {
        let (reader, writer) = stream.into_split();
        let (events, events_rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (outbound, outbound_rx) = mpsc::unbounded_channel();

        let reader_task = tokio::spawn(read_events(reader, events.clone()));
        let writer_task = tokio::spawn(write_requests(writer, outbound_rx));

        let client = Self {
            outbound,
            events,
            reader_task,
            writer_task,
        };
        (client, events_rx)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn send(&self, request: &ClientRequest) -> Result<(), ClientError> {
        let line = encode_line(request)?;
        debug!(request = request.kind(), "sending request");
        self.outbound
            .send(line)
            .map_err(|_| ClientError::Disconnected)
    }
}

impl Drop for GameClient {
    fn drop(&mut self) {
        self.reader_task.abort();
        self.writer_task.abort();
    }
}

async fn read_events(reader: OwnedReadHalf, events: broadcast::Sender<ClientEvent>) {
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LEN));

    while let Some(frame) = lines.next().await {
        let line = match frame {
            Ok(line) => line,
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                let _ = events.send(ClientEvent::Error("server sent an over-long line".into()));
                continue;
            }
            Err(LinesCodecError::Io(error)) => {
                warn!(%error, "connection to server failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match decode_line::<ServerEvent>(&line) {
            Ok(event) => {
                let _ = events.send(ClientEvent::Server(event));
            }
            Err(error) => {
                warn!(%error, "invalid server event");
                let _ = events.send(ClientEvent::Error(error.to_string()));
            }
        }
    }

    info!("server closed the connection");
    let _ = events.send(ClientEvent::Disconnected);
}

async fn write_requests(writer: OwnedWriteHalf, mut outbound: mpsc::UnboundedReceiver<String>) {
    let mut sink = FramedWrite::new(writer, LinesCodec::new_with_max_length(MAX_LINE_LEN));
    while let Some(line) = outbound.recv().await {
        if let Err(error) = sink.send(line).await {
            warn!(%error, "failed to send request");
            break;
        }
    }
}
