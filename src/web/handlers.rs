use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::AppContext;
use crate::panel::{ConnectionStatus, GameSnapshot};

const PANEL_TEMPLATE: &str = include_str!("panel.html");

#[derive(Debug, Deserialize)]
pub struct DifficultyRequest {
    pub level: i64,
}

/// GET / - the control panel page, rendered from the current snapshot.
pub async fn index(State(ctx): State<Arc<AppContext>>) -> Html<String> {
    let snapshot = ctx.state.snapshot().await;
    let transcript = ctx.state.read_transcript().await;
    Html(render_panel(&snapshot, &transcript))
}

/// GET /status - JSON snapshot of the game state.
pub async fn status(State(ctx): State<Arc<AppContext>>) -> Json<GameSnapshot> {
    Json(ctx.state.snapshot().await)
}

/// GET /debug - the plain-text transcript.
pub async fn debug_transcript(State(ctx): State<Arc<AppContext>>) -> String {
    ctx.state.read_transcript().await
}

/// POST /clear-debug
pub async fn clear_debug(State(ctx): State<Arc<AppContext>>) -> &'static str {
    ctx.state.clear_transcript().await;
    "Debug output cleared"
}

/// POST /on
pub async fn power_on(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.dispatcher.power_on().await {
        Ok(msg) => msg.into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /off
pub async fn power_off(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.dispatcher.power_off().await {
        Ok(msg) => msg.into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /lock
pub async fn lock_in(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.dispatcher.lock_in().await {
        Ok(msg) => msg.into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /difficulty - JSON body `{"level": 0|1|2}`.
pub async fn set_difficulty(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<DifficultyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid request body: {rejection}"))
                .into_response();
        }
    };

    match ctx.dispatcher.set_difficulty(request.level).await {
        Ok(label) => format!("Difficulty set to {label}").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Placeholder substitution into the panel template. Device-sourced text is
/// escaped so the first page load renders the same as the `textContent`
/// refresh path.
fn render_panel(snapshot: &GameSnapshot, transcript: &str) -> String {
    let connection_color = match snapshot.connection_status {
        ConnectionStatus::Connected => "#27ae60",
        _ => "#e74c3c",
    };
    PANEL_TEMPLATE
        .replace(
            "{{connection_status}}",
            &escape_html(&snapshot.connection_status.to_string()),
        )
        .replace("{{connection_color}}", connection_color)
        .replace("{{game_status}}", &escape_html(&snapshot.game_status))
        .replace("{{difficulty_level}}", &snapshot.difficulty.level().to_string())
        .replace("{{debug_output}}", &escape_html(transcript))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
