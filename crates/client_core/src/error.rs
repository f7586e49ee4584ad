use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection to the server is closed")]
    Disconnected,
    #[error(transparent)]
    Protocol(#[from] shared::error::ProtocolError),
}
