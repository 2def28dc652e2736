//! Subject Handlers
//!
//! Subject list and per-subject section index pages.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    db::queries,
    error::SiteError,
    handlers::not_found_page,
    state::SiteState,
    templates::{SectionListTemplate, SubjectListTemplate},
};

/// Handler for /subjects - lists all subjects.
pub async fn subject_list(State(state): State<SiteState>) -> Result<Response, SiteError> {
    let subjects = queries::all_subjects(state.db.pool()).await?;
    Ok(SubjectListTemplate::new("Subjects", subjects).into_response())
}

/// Handler for /subjects/{subjectcode} - lists a subject's sections in
/// display order, or 404 for an unknown code.
pub async fn subject_index(
    State(state): State<SiteState>,
    Path(subjectcode): Path<String>,
) -> Result<Response, SiteError> {
    let Some(subject) = queries::subject_by_code(state.db.pool(), &subjectcode).await? else {
        return Ok(not_found_page());
    };

    let sections = queries::sections_for_subject(state.db.pool(), &subject.code).await?;
    Ok(SectionListTemplate::new(subject, sections).into_response())
}
