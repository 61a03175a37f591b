//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod folding;
pub mod tag_diff;
pub mod tags;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, Page, Tag},
};

/// Operations every stored entity supports.
///
/// A missing id is never an error: lookups return `None`, `update` and
/// `delete_by_id` return `false`.
#[async_trait]
pub trait CrudRepository<T>: Send + Sync {
    /// Entities ordered by id, `page.size` at most, starting at `page.offset()`
    async fn find_all(&self, page: Page) -> AppResult<Vec<T>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<T>>;

    /// Insert and return the entity with its assigned id
    async fn save(&self, entity: &T) -> AppResult<T>;

    /// Full replacement by id; true if exactly one row matched
    async fn update(&self, entity: &T) -> AppResult<bool>;

    /// True if at least one row was removed
    async fn delete_by_id(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait TagRepository: CrudRepository<Tag> {
    async fn find_by_book_id(&self, book_id: i32) -> AppResult<Vec<Tag>>;
}

#[async_trait]
pub trait BookRepository: CrudRepository<Book> {
    async fn find_by_author_id(&self, author_id: i32) -> AppResult<Vec<Book>>;

    async fn find_by_tag_id(&self, tag_id: i32, page: Page) -> AppResult<Vec<Book>>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub tags: tags::TagsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            tags: tags::TagsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round trip to the database, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
