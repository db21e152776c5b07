pub mod handlers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::panel::{CommandDispatcher, PanelError, PanelState};

/// Everything the HTTP handlers share: the game/transcript state and the
/// dispatcher that fronts the serial session.
pub struct AppContext {
    pub state: Arc<PanelState>,
    pub dispatcher: CommandDispatcher,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/status", get(handlers::status))
        .route("/debug", get(handlers::debug_transcript))
        .route("/clear-debug", post(handlers::clear_debug))
        .route("/on", post(handlers::power_on))
        .route("/off", post(handlers::power_off))
        .route("/lock", post(handlers::lock_in))
        .route("/difficulty", post(handlers::set_difficulty))
        .with_state(ctx)
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        let status = match &self {
            PanelError::NotConnected | PanelError::InvalidDifficulty(_) => {
                StatusCode::BAD_REQUEST
            }
            PanelError::Serial(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
