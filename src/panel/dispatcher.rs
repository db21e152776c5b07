use std::sync::Arc;

use super::{PanelError, PanelState, Result};
use crate::serial::{Command, Difficulty, SerialSession};

/// Translates HTTP-triggered intents into single-line serial commands.
///
/// Every accepted command is recorded in the transcript (`Sending: <cmd>`)
/// and written to the device exactly once; nothing is retried. Attempts and
/// score are never touched here: those fields only move on device-reported
/// lines.
#[derive(Clone)]
pub struct CommandDispatcher {
    session: Arc<SerialSession>,
    state: Arc<PanelState>,
}

impl CommandDispatcher {
    pub fn new(session: Arc<SerialSession>, state: Arc<PanelState>) -> Self {
        Self { session, state }
    }

    /// Power the game on. Optimistically flips the game status to RUNNING;
    /// the device confirms with its own `STATUS:` line.
    pub async fn power_on(&self) -> Result<&'static str> {
        self.send(Command::PowerOn).await?;
        self.state.set_game_status("RUNNING").await;
        Ok("Power ON command sent!")
    }

    pub async fn power_off(&self) -> Result<&'static str> {
        self.send(Command::PowerOff).await?;
        self.state.set_game_status("STANDBY").await;
        Ok("Power OFF command sent!")
    }

    /// Commit the current dial position as the player's guess. No local
    /// state change; the device reports the outcome.
    pub async fn lock_in(&self) -> Result<&'static str> {
        self.send(Command::LockIn).await?;
        Ok("Lock-in command sent!")
    }

    /// Set the game difficulty. Levels outside {0,1,2} are rejected before
    /// anything reaches the device.
    pub async fn set_difficulty(&self, level: i64) -> Result<&'static str> {
        let difficulty =
            Difficulty::from_level(level).ok_or(PanelError::InvalidDifficulty(level))?;
        self.send(Command::SetDifficulty(difficulty)).await?;
        self.state.set_difficulty(difficulty).await;
        Ok(difficulty.label())
    }

    async fn send(&self, command: Command) -> Result<()> {
        if !self.session.is_connected().await {
            return Err(PanelError::NotConnected);
        }
        let line = command.encode();
        self.state.append_transcript(&format!("Sending: {line}")).await;
        self.session.write_line(&line).await?;
        log::info!("Sent command: {}", line);
        Ok(())
    }
}
