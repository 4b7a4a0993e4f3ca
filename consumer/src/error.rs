use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use product_core::ApiError;
use serde_json::json;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("forwarding task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ConsumerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConsumerError::Api(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            ConsumerError::Api(ApiError::Rejected { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ConsumerError::Api(ApiError::NotFound(_)) => "not_found",
            ConsumerError::Api(ApiError::Rejected { .. }) => "upstream_rejected",
            _ => "internal",
        }
    }

    fn message(&self) -> String {
        match self {
            ConsumerError::Api(ApiError::Rejected { reason, .. }) => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ConsumerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "forwarding failed");
        } else {
            tracing::warn!(error = %self, "upstream rejected request");
        }
        let body = Json(json!({
            "error": self.code(),
            "message": self.message(),
        }));
        (status, body).into_response()
    }
}
