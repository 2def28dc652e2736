//! Lookup queries keyed by URL path segments.
//!
//! Each function takes the pool handle explicitly and returns plain ordered
//! rows; a miss is `Ok(None)` or an empty vec, never an error.

use sqlx::SqlitePool;

use crate::{
    db::records::{Comment, Paragraph, Section, Subject},
    error::SiteError,
};

/// All subjects, in insertion order.
pub async fn all_subjects(pool: &SqlitePool) -> Result<Vec<Subject>, SiteError> {
    let subjects = sqlx::query_as("SELECT id, code, name FROM subjects")
        .fetch_all(pool)
        .await?;
    Ok(subjects)
}

/// The subject whose code matches exactly.
pub async fn subject_by_code(
    pool: &SqlitePool,
    code: &str,
) -> Result<Option<Subject>, SiteError> {
    let subject = sqlx::query_as("SELECT id, code, name FROM subjects WHERE code = ?1")
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(subject)
}

/// Sections of a subject, in display order.
pub async fn sections_for_subject(
    pool: &SqlitePool,
    subject_code: &str,
) -> Result<Vec<Section>, SiteError> {
    let sections = sqlx::query_as(
        "SELECT id, name, url, seq, subject_code FROM sections \
         WHERE subject_code = ?1 ORDER BY seq ASC",
    )
    .bind(subject_code)
    .fetch_all(pool)
    .await?;
    Ok(sections)
}

/// The section addressed by a (subject code, URL slug) pair.
pub async fn section_by_url(
    pool: &SqlitePool,
    subject_code: &str,
    url: &str,
) -> Result<Option<Section>, SiteError> {
    let section = sqlx::query_as(
        "SELECT id, name, url, seq, subject_code FROM sections \
         WHERE subject_code = ?1 AND url = ?2",
    )
    .bind(subject_code)
    .bind(url)
    .fetch_optional(pool)
    .await?;
    Ok(section)
}

/// Paragraphs of a section, in display order.
pub async fn paragraphs_for_section(
    pool: &SqlitePool,
    section_id: i64,
) -> Result<Vec<Paragraph>, SiteError> {
    let paragraphs = sqlx::query_as(
        "SELECT id, html, seq, section_id FROM paragraphs \
         WHERE section_id = ?1 ORDER BY seq ASC",
    )
    .bind(section_id)
    .fetch_all(pool)
    .await?;
    Ok(paragraphs)
}

/// Comments on a paragraph, oldest first.
pub async fn comments_for_paragraph(
    pool: &SqlitePool,
    paragraph_id: i64,
) -> Result<Vec<Comment>, SiteError> {
    let comments = sqlx::query_as(
        "SELECT id, name, email, created_at, text, paragraph_id FROM comments \
         WHERE paragraph_id = ?1 ORDER BY created_at ASC, id ASC",
    )
    .bind(paragraph_id)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}
