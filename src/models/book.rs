//! Book aggregate

use super::{level::Level, tag::TagSet};

/// A book together with the tags it is associated with.
///
/// The book owns its rows in `book_tags`, not the tags themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub publication_year: i32,
    pub isbn: String,
    pub level: Level,
    pub description: String,
    pub available: bool,
    pub tags: TagSet,
}
