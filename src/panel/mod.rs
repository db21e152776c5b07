pub mod dispatcher;
pub mod state;

pub use dispatcher::CommandDispatcher;
pub use state::PanelState;

use serde::{Deserialize, Serialize};

use crate::serial::{Difficulty, SerialError};

/// Connection state of the one serial device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
    Failed(String),
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Failed(reason) => write!(f, "Failed: {reason}"),
        }
    }
}

/// One consistent view of the game state, as served by `/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub connection_status: ConnectionStatus,
    pub game_status: String,
    pub score: u32,
    pub attempts_remaining: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("Device not connected")]
    NotConnected,

    #[error("Invalid difficulty level: {0} (expected 0, 1 or 2)")]
    InvalidDifficulty(i64),

    #[error("Serial error: {0}")]
    Serial(SerialError),
}

impl From<SerialError> for PanelError {
    fn from(e: SerialError) -> Self {
        match e {
            SerialError::NotConnected => PanelError::NotConnected,
            other => PanelError::Serial(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;
