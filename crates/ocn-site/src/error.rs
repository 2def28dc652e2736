//! Site error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
