use chrono::Local;
use tokio::sync::{Mutex, RwLock};

use super::{ConnectionStatus, GameSnapshot};
use crate::serial::{parse_device_line, DeviceLine, Difficulty};

/// Timestamped transcript of all inbound device lines and selected outbound
/// commands. Unbounded, like the original panel; cleared only by operator
/// action.
#[derive(Debug, Default)]
struct Transcript {
    buf: String,
}

impl Transcript {
    fn append(&mut self, text: &str) {
        let stamp = Local::now().format("%H:%M:%S%.3f");
        self.buf.push_str(&format!("[{stamp}] {text}\n"));
    }

    fn read_all(&self) -> String {
        self.buf.clone()
    }

    fn clear(&mut self) {
        self.buf.clear();
    }
}

#[derive(Debug)]
struct GameState {
    connection: ConnectionStatus,
    game_status: String,
    score: u32,
    attempts_remaining: u32,
    difficulty: Difficulty,
}

impl Default for GameState {
    fn default() -> Self {
        // Mirrors the device's power-on defaults
        Self {
            connection: ConnectionStatus::Disconnected,
            game_status: "STANDBY".to_string(),
            score: 0,
            attempts_remaining: 3,
            difficulty: Difficulty::Moderate,
        }
    }
}

/// Shared mutable state of the control panel: game fields plus the debug
/// transcript. Shared via `Arc` between the HTTP handlers and the serial
/// listener task; every mutation goes through one of the lock-serialized
/// methods here, so readers never observe a torn update.
#[derive(Debug, Default)]
pub struct PanelState {
    game: RwLock<GameState>,
    transcript: Mutex<Transcript>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        let game = self.game.read().await;
        GameSnapshot {
            connection_status: game.connection.clone(),
            game_status: game.game_status.clone(),
            score: game.score,
            attempts_remaining: game.attempts_remaining,
            difficulty: game.difficulty,
        }
    }

    pub async fn set_connection(&self, status: ConnectionStatus) {
        let mut game = self.game.write().await;
        game.connection = status;
    }

    pub async fn set_game_status(&self, status: &str) {
        let mut game = self.game.write().await;
        game.game_status = status.to_string();
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) {
        let mut game = self.game.write().await;
        game.difficulty = difficulty;
    }

    pub async fn append_transcript(&self, text: &str) {
        let mut transcript = self.transcript.lock().await;
        transcript.append(text);
    }

    pub async fn read_transcript(&self) -> String {
        let transcript = self.transcript.lock().await;
        transcript.read_all()
    }

    pub async fn clear_transcript(&self) {
        let mut transcript = self.transcript.lock().await;
        transcript.clear();
    }

    /// Apply one inbound device line: record it in the transcript verbatim,
    /// then update whichever game field it reports. Unknown lines are
    /// transcript-only.
    pub async fn apply_device_line(&self, line: &str) {
        self.append_transcript(line).await;

        match parse_device_line(line) {
            DeviceLine::Status(text) => {
                let mut game = self.game.write().await;
                game.game_status = text.to_string();
            }
            DeviceLine::Score(score) | DeviceLine::FinalScore(score) => {
                let mut game = self.game.write().await;
                game.score = score;
            }
            DeviceLine::Attempts(attempts) => {
                let mut game = self.game.write().await;
                game.attempts_remaining = attempts;
            }
            DeviceLine::Difficulty(difficulty) => {
                let mut game = self.game.write().await;
                game.difficulty = difficulty;
            }
            DeviceLine::Debug(_) => {}
        }
    }
}
