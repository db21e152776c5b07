pub mod protocol;
pub mod session;

pub use protocol::{parse_device_line, Command, DeviceLine, Difficulty};
pub use session::SerialSession;

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("Failed to open port: {0}")]
    OpenFailed(String),

    #[error("Device not connected")]
    NotConnected,

    #[error("Serial write timeout")]
    Timeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialport error: {0}")]
    Serialport(#[from] serialport::Error),
}

pub type Result<T> = std::result::Result<T, SerialError>;
