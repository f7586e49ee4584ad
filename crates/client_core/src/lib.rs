use shared::protocol::ServerEvent;

pub mod error;
pub mod state;
pub mod transport;

pub use error::ClientError;
pub use state::{ClientState, GameResult, InputOutcome, InputState};
pub use transport::GameClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Server(ServerEvent),
    Error(String),
    Disconnected,
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
