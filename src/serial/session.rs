use std::sync::Arc;
use std::time::Duration;

use serialport::SerialPort;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_serial::SerialPortBuilderExt;

use super::{Result, SerialError};
use crate::panel::state::PanelState;
use crate::panel::ConnectionStatus;

pub const BAUD_RATE: u32 = 9600;

/// Read/write timeout for the port, matching the device's line cadence.
const IO_TIMEOUT: Duration = Duration::from_secs(1);

type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Owns the one physical serial connection to the Safe-Cracker device.
///
/// The session is created disconnected at process start; `open` establishes
/// the link once and spawns the inbound listener. There is no reconnection:
/// if `open` fails the process keeps serving HTTP in degraded mode and every
/// device command surfaces `NotConnected`.
pub struct SerialSession {
    port_name: String,
    baud_rate: u32,
    writer: Mutex<Option<BoxedWriter>>,
}

impl SerialSession {
    pub fn new(port_name: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
            writer: Mutex::new(None),
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Open the port and start streaming inbound lines into the shared state.
    ///
    /// DTR/RTS are asserted the way the device expects before any traffic.
    pub async fn open(self: Arc<Self>, state: Arc<PanelState>) -> Result<()> {
        let mut stream = tokio_serial::new(&self.port_name, self.baud_rate)
            .timeout(IO_TIMEOUT)
            .open_native_async()
            .map_err(|e| SerialError::OpenFailed(e.to_string()))?;

        stream.write_data_terminal_ready(true)?;
        stream.write_request_to_send(true)?;

        let (read_half, write_half) = tokio::io::split(stream);
        self.attach_writer(Box::new(write_half)).await;
        log::info!("Opened {} at {} baud", self.port_name, self.baud_rate);

        tokio::spawn(listen(read_half, state, self));
        Ok(())
    }

    /// Install the write half of the link. Used by `open` and by tests that
    /// substitute an in-memory stream for the port.
    pub async fn attach_writer(&self, writer: BoxedWriter) {
        let mut guard = self.writer.lock().await;
        *guard = Some(writer);
    }

    pub async fn is_connected(&self) -> bool {
        self.writer.lock().await.is_some()
    }

    /// Write one ASCII line to the device, newline-terminated.
    ///
    /// Bounded by the 1 second I/O timeout so HTTP handlers never hang on a
    /// wedged port.
    pub async fn write_line(&self, text: &str) -> Result<()> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(SerialError::NotConnected)?;

        let framed = format!("{text}\n");
        timeout(IO_TIMEOUT, async {
            writer.write_all(framed.as_bytes()).await?;
            writer.flush().await
        })
        .await
        .map_err(|_| SerialError::Timeout)??;

        Ok(())
    }

    /// Flush and release the port. Idempotent; called once at shutdown.
    pub async fn close(&self) {
        let mut guard = self.writer.lock().await;
        if let Some(mut writer) = guard.take() {
            let _ = writer.shutdown().await;
            log::info!("Closed {}", self.port_name);
        }
    }
}

/// Inbound listener: reads one line at a time and applies it to the shared
/// state. Read errors are logged to the transcript and the loop continues;
/// only end-of-stream ends the task. EOF releases the write half too, so
/// later commands answer "not connected" instead of failing mid-write.
pub async fn listen<R>(reader: R, state: Arc<PanelState>, session: Arc<SerialSession>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim_end_matches('\r');
                state.apply_device_line(line).await;
            }
            Ok(None) => {
                log::info!("Serial stream ended");
                session.close().await;
                state.set_connection(ConnectionStatus::Disconnected).await;
                state.append_transcript("Serial stream closed").await;
                break;
            }
            Err(e) => {
                log::warn!("Serial read error: {}", e);
                state.append_transcript(&format!("Error: {e}")).await;
                // Keep listening; transient faults must not drop the session
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    }
}
