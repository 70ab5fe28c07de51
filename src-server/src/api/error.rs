// FICHIER : src-server/src/api/error.rs

//! Traduction des erreurs métier en réponses HTTP `{"error": "..."}`.

use crate::utils::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save data";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl AppError {
    /// Statut HTTP et message public ; la cause technique reste dans les logs.
    pub fn public_parts(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(label) => (StatusCode::NOT_FOUND, format!("{} not found", label)),
            AppError::Persistence { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SAVE_FAILED_MESSAGE.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.public_parts();
        // Les échecs de sauvegarde sont déjà journalisés par le handler
        if status.is_server_error() && !matches!(self, AppError::Persistence { .. }) {
            tracing::error!("❌ {}", self);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
