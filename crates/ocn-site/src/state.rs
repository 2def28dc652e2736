//! Shared application state.

use crate::db::Db;

/// State injected into every handler: the store handle, nothing else.
#[derive(Clone, Debug)]
pub struct SiteState {
    pub db: Db,
}

impl SiteState {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}
