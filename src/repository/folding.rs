//! Folding of joined book/tag rows into `Book` aggregates

use indexmap::IndexMap;
use sqlx::FromRow;

use crate::models::{Book, Level, Tag, TagSet};

/// Column list shared by every book aggregate query. Expects the aliases
/// `b` (book), `bt` (book_tags) and `t` (tag).
pub const BOOK_TAG_COLUMNS: &str = "b.id, b.title, b.author_id, b.publication_year, b.isbn, \
     b.level, b.description, b.available, t.id AS tag_id, t.name AS tag_name";

/// One row of `book LEFT JOIN book_tags LEFT JOIN tag`.
///
/// `tag_id`/`tag_name` are NULL when the book has no tags.
#[derive(Debug, Clone, FromRow)]
pub struct BookTagRow {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub publication_year: i32,
    pub isbn: String,
    pub level: Level,
    pub description: String,
    pub available: bool,
    pub tag_id: Option<i32>,
    pub tag_name: Option<String>,
}

/// Consumes rows one at a time and owns the accumulator built from them.
pub trait RowFolder {
    type Row;
    type Output;

    fn fold_row(&mut self, row: Self::Row);

    fn finish(self) -> Self::Output;
}

/// Folds rows into one `Book` per id, in the order ids were first seen.
///
/// Rows of the same book do not need to be adjacent.
#[derive(Debug, Default)]
pub struct BookFolder {
    books: IndexMap<i32, Book>,
}

impl BookFolder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowFolder for BookFolder {
    type Row = BookTagRow;
    type Output = Vec<Book>;

    fn fold_row(&mut self, row: BookTagRow) {
        let book = self.books.entry(row.id).or_insert_with(|| Book {
            id: row.id,
            title: row.title,
            author_id: row.author_id,
            publication_year: row.publication_year,
            isbn: row.isbn,
            level: row.level,
            description: row.description,
            available: row.available,
            tags: TagSet::new(),
        });

        // A null tag id is the left-join filler row of a tag-less book
        if let Some(tag_id) = row.tag_id.filter(|id| *id != 0) {
            book.tags.insert(Tag::new(tag_id, row.tag_name.unwrap_or_default()));
        }
    }

    fn finish(self) -> Vec<Book> {
        self.books.into_values().collect()
    }
}

/// Folds an already materialized row sequence.
pub fn fold_rows<F, I>(mut folder: F, rows: I) -> F::Output
where
    F: RowFolder,
    I: IntoIterator<Item = F::Row>,
{
    for row in rows {
        folder.fold_row(row);
    }
    folder.finish()
}
