//! Business logic services

pub mod authors;
pub mod books;
pub mod tags;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub tags: tags::TagService,
    pub books: books::BookService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorService::new(Arc::new(repository.authors)),
            tags: tags::TagService::new(Arc::new(repository.tags)),
            books: books::BookService::new(Arc::new(repository.books)),
        }
    }
}
