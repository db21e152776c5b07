use std::sync::Arc;

use safecracker_panel::panel::{CommandDispatcher, ConnectionStatus, PanelError, PanelState};
use safecracker_panel::serial::session::listen;
use safecracker_panel::serial::SerialSession;
use tokio::io::AsyncWriteExt;

fn session() -> Arc<SerialSession> {
    Arc::new(SerialSession::new("test-port", 9600))
}

#[tokio::test]
async fn test_listener_applies_status_and_score_lines() {
    let state = Arc::new(PanelState::new());
    let (mut device, port) = tokio::io::duplex(1024);

    device
        .write_all(b"STATUS:SWEEPING\r\nSCORE:230\nRECEIVED COMMAND: L\n")
        .await
        .unwrap();
    drop(device);

    listen(port, state.clone(), session()).await;

    let snap = state.snapshot().await;
    assert_eq!(snap.game_status, "SWEEPING");
    assert_eq!(snap.score, 230);

    let transcript = state.read_transcript().await;
    assert!(transcript.contains("STATUS:SWEEPING"));
    assert!(transcript.contains("RECEIVED COMMAND: L"));
}

#[tokio::test]
async fn test_listener_handles_attempts_and_final_score() {
    let state = Arc::new(PanelState::new());
    let (mut device, port) = tokio::io::duplex(1024);

    device
        .write_all(b"ATTEMPTS:1\nRESULT:WRONG,1\nFINAL_SCORE:450\nSTATUS:GAME_OVER\n")
        .await
        .unwrap();
    drop(device);

    listen(port, state.clone(), session()).await;

    let snap = state.snapshot().await;
    assert_eq!(snap.attempts_remaining, 1);
    assert_eq!(snap.score, 450);
    assert_eq!(snap.game_status, "GAME_OVER");
}

#[tokio::test]
async fn test_listener_takes_trailing_line_without_newline() {
    let state = Arc::new(PanelState::new());
    let (mut device, port) = tokio::io::duplex(64);

    device.write_all(b"STATUS:STANDBY").await.unwrap();
    drop(device);

    listen(port, state.clone(), session()).await;

    assert_eq!(state.snapshot().await.game_status, "STANDBY");
}

#[tokio::test]
async fn test_stream_eof_releases_session_and_reports_disconnect() {
    let state = Arc::new(PanelState::new());
    let session = session();
    state.set_connection(ConnectionStatus::Connected).await;

    let (panel_side, _device_side) = tokio::io::duplex(64);
    session.attach_writer(Box::new(panel_side)).await;
    assert!(session.is_connected().await);

    let (mut device, port) = tokio::io::duplex(64);
    device.write_all(b"STATUS:RUNNING\n").await.unwrap();
    drop(device); // unplugged: the read side hits EOF

    listen(port, state.clone(), session.clone()).await;

    assert!(!session.is_connected().await);
    assert_eq!(state.snapshot().await.connection_status, ConnectionStatus::Disconnected);
    assert!(state.read_transcript().await.contains("Serial stream closed"));

    // Commands after the disconnect answer NotConnected, not an IO failure
    let dispatcher = CommandDispatcher::new(session, state);
    assert!(matches!(dispatcher.power_on().await, Err(PanelError::NotConnected)));
}
