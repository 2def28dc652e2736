//! Section Page Handler

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    db::queries,
    error::SiteError,
    handlers::not_found_page,
    state::SiteState,
    templates::{ParagraphView, SectionTemplate},
};

/// Handler for /subjects/{subjectcode}/{sectionurlname} - renders a section's
/// paragraphs in display order, each with its comments, or 404 for an
/// unknown (code, slug) pair.
pub async fn section(
    State(state): State<SiteState>,
    Path((subjectcode, sectionurlname)): Path<(String, String)>,
) -> Result<Response, SiteError> {
    let pool = state.db.pool();

    let Some(section) = queries::section_by_url(pool, &subjectcode, &sectionurlname).await? else {
        return Ok(not_found_page());
    };

    let paragraphs = queries::paragraphs_for_section(pool, section.id).await?;
    let mut views = Vec::with_capacity(paragraphs.len());
    for paragraph in paragraphs {
        let comments = queries::comments_for_paragraph(pool, paragraph.id).await?;
        views.push(ParagraphView {
            paragraph,
            comments,
        });
    }

    Ok(SectionTemplate::new(section, views).into_response())
}
