use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Body could not be decoded
    #[error("{0}")]
    BadRequest(String),
    #[error("Failed to store uploaded image: {0}")]
    Upload(#[from] std::io::Error),
}

impl ArticleError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Validation { .. }) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
