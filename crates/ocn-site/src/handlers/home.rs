//! Home Page Handler

use axum::response::IntoResponse;

use crate::templates::HomeTemplate;

/// Handler for / - renders the landing page.
pub async fn home() -> impl IntoResponse {
    HomeTemplate::new("Online Course Notes")
}
