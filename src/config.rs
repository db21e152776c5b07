use std::net::SocketAddr;

use clap::Parser;

use crate::serial::session::BAUD_RATE;

/// Command-line configuration for the control panel.
#[derive(Debug, Parser)]
#[command(name = "safecracker-panel", version, about = "Web control panel for the Safe-Cracker serial game device")]
pub struct Args {
    /// Serial port the device is attached to
    #[arg(long, default_value = "/dev/ttyACM0")]
    pub port: String,

    /// Baud rate for the serial link
    #[arg(long, default_value_t = BAUD_RATE)]
    pub baud: u32,

    /// Address the HTTP server listens on
    #[arg(long, default_value = "127.0.0.1:5001")]
    pub listen: SocketAddr,
}
