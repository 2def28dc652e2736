//! ocn-site: a small university course-notes website.
//!
//! Subjects contain ordered sections, sections contain ordered paragraphs of
//! pre-rendered HTML, and paragraphs carry reader comments. The store is
//! seeded with demo data on first start; the HTTP surface is read-only.

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod handlers;
mod state;
mod templates;

use config::SiteConfig;
use db::Db;
use state::SiteState;

/// Build version for cache busting static assets.
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ocn_site=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SiteConfig::load()?;

    let db = Db::open(&config.database).await?;
    db.initialize().await?;

    let app = router(SiteState::new(db), &config.server.static_dir);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        "ocn-site listening on http://{}",
        config.server.bind_address
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router.
fn router(state: SiteState, static_dir: &std::path::Path) -> Router {
    // If comments are ever loaded client-side, a
    // /subjects/{subjectcode}/{sectionurlname}/{paragraphid} route goes here.
    Router::new()
        .route("/", get(handlers::home::home))
        .route("/subjects", get(handlers::subjects::subject_list))
        .route("/subjects/{subjectcode}", get(handlers::subjects::subject_index))
        .route(
            "/subjects/{subjectcode}/{sectionurlname}",
            get(handlers::sections::section),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:",
            ),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::config::DatabaseConfig;

    async fn seeded_app() -> (tempfile::TempDir, Router) {
        let tmp = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: tmp.path().join("ocn.db"),
            ..DatabaseConfig::default()
        };
        let db = Db::open(&config).await.unwrap();
        db.initialize().await.unwrap();
        let static_dir = std::path::PathBuf::from("static");
        (tmp, router(SiteState::new(db), &static_dir))
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn home_page_loads() {
        let (_tmp, app) = seeded_app().await;
        let (status, body) = get_page(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Online Course Notes"));
    }

    #[tokio::test]
    async fn subject_list_shows_both_subjects() {
        let (_tmp, app) = seeded_app().await;
        let (status, body) = get_page(app, "/subjects").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Prob &amp; Stat"));
        assert!(body.contains("Linear Models"));
        assert!(body.contains("/subjects/mast30020"));
        assert!(body.contains("/subjects/mast30025"));
    }

    #[tokio::test]
    async fn subject_index_lists_sections_in_seq_order() {
        let (_tmp, app) = seeded_app().await;
        let (status, body) = get_page(app, "/subjects/mast30020").await;

        assert_eq!(status, StatusCode::OK);
        let sigalg = body.find("Sigma algebras").unwrap();
        let randvar = body.find("Random variables").unwrap();
        let expectation = body.find("Expectation").unwrap();
        assert!(sigalg < randvar);
        assert!(randvar < expectation);
    }

    #[tokio::test]
    async fn section_page_shows_paragraphs_and_comments() {
        let (_tmp, app) = seeded_app().await;
        let (status, body) = get_page(app, "/subjects/mast30020/sigalg").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Here is some maths"));
        assert!(body.contains("AF"));
        // Apostrophe is HTML-escaped by the template engine
        assert!(body.contains("s some cool maths."));
    }

    #[tokio::test]
    async fn unknown_subject_is_404() {
        let (_tmp, app) = seeded_app().await;
        let (status, _body) = get_page(app, "/subjects/doesnotexist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_section_is_404() {
        let (_tmp, app) = seeded_app().await;
        let (status, _body) = get_page(app, "/subjects/mast30020/doesnotexist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unmatched_path_falls_back_to_404() {
        let (_tmp, app) = seeded_app().await;
        let (status, _body) = get_page(app, "/nonexistent-page-12345").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn security_headers_present() {
        let (_tmp, app) = seeded_app().await;
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert!(headers.contains_key("strict-transport-security"));
        assert!(headers.contains_key("x-content-type-options"));
        assert!(headers.contains_key("referrer-policy"));
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    }
}
