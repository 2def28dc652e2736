//! Route Handlers
//!
//! HTTP request handlers for all routes.

pub mod home;
pub mod sections;
pub mod subjects;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::templates::NotFoundTemplate;

/// Renders the shared 404 page.
pub(crate) fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate::new("Page Not Found")).into_response()
}

/// Fallback handler for unmatched paths.
pub async fn not_found() -> Response {
    not_found_page()
}
