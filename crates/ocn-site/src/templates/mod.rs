//! Askama Templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;
use askama_web::WebTemplate;

use crate::{
    BUILD_VERSION,
    db::records::{Comment, Paragraph, Section, Subject},
};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl HomeTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            v: BUILD_VERSION,
        }
    }
}

/// Subject list page template.
#[derive(Template, WebTemplate)]
#[template(path = "subject_list.html")]
pub struct SubjectListTemplate {
    pub title: String,
    pub subjects: Vec<Subject>,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl SubjectListTemplate {
    pub fn new(title: impl Into<String>, subjects: Vec<Subject>) -> Self {
        Self {
            title: title.into(),
            subjects,
            v: BUILD_VERSION,
        }
    }
}

/// Section list page for a single subject.
#[derive(Template, WebTemplate)]
#[template(path = "section_list.html")]
pub struct SectionListTemplate {
    pub title: String,
    pub subject: Subject,
    pub sections: Vec<Section>,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl SectionListTemplate {
    pub fn new(subject: Subject, sections: Vec<Section>) -> Self {
        let title = subject.name.clone();
        Self {
            title,
            subject,
            sections,
            v: BUILD_VERSION,
        }
    }
}

/// A paragraph with its comments, ready for display.
pub struct ParagraphView {
    pub paragraph: Paragraph,
    pub comments: Vec<Comment>,
}

/// Section page template: ordered paragraphs, each with its comments.
#[derive(Template, WebTemplate)]
#[template(path = "section.html")]
pub struct SectionTemplate {
    pub title: String,
    pub section: Section,
    pub paragraphs: Vec<ParagraphView>,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl SectionTemplate {
    pub fn new(section: Section, paragraphs: Vec<ParagraphView>) -> Self {
        let title = section.name.clone();
        Self {
            title,
            section,
            paragraphs,
            v: BUILD_VERSION,
        }
    }
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub title: String,
    /// Build version for cache busting static assets.
    pub v: &'static str,
}

impl NotFoundTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            v: BUILD_VERSION,
        }
    }
}
