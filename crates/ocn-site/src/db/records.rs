//! Record types for the four course-notes tables.

use sqlx::prelude::FromRow;
use time::{OffsetDateTime, macros::format_description};

/// A university course, identified by a short code and full name.
#[derive(Debug, Clone, FromRow)]
pub struct Subject {
    pub id: i64,
    /// Subject code; 'mast30025'
    pub code: String,
    /// Full subject name; 'Linear Statistical Models'
    pub name: String,
}

/// An ordered topic grouping within a Subject, addressable by a URL slug.
#[derive(Debug, Clone, FromRow)]
pub struct Section {
    pub id: i64,
    /// Proper name of a section; "Random Variables"
    pub name: String,
    /// Clean URL for a section; "randvars"
    pub url: String,
    /// Order in which sections appear
    pub seq: i64,
    pub subject_code: String,
}

/// An ordered unit of pre-rendered content within a Section.
#[derive(Debug, Clone, FromRow)]
pub struct Paragraph {
    pub id: i64,
    /// Pre-built HTML to render this paragraph.
    pub html: String,
    /// Integer order in which the paragraphs should appear
    pub seq: i64,
    pub section_id: i64,
}

/// Reader-submitted feedback attached to a single Paragraph.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    /// Name of the author
    pub name: String,
    /// Email contact for the author
    pub email: String,
    /// Date and time the comment was submitted
    pub created_at: OffsetDateTime,
    /// Text content of the comment
    pub text: String,
    pub paragraph_id: i64,
}

impl Comment {
    /// Submission time formatted for display.
    pub fn created_at_display(&self) -> String {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
        self.created_at.format(&format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn comment_display_timestamp() {
        let comment = Comment {
            id: 1,
            name: "AF".to_string(),
            email: "a@a.a".to_string(),
            created_at: datetime!(2026-03-01 09:30:00 UTC),
            text: "That's some cool maths.".to_string(),
            paragraph_id: 1,
        };
        assert_eq!(comment.created_at_display(), "2026-03-01 09:30");
    }
}
