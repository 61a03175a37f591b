//! Author management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDto, Page},
    repository::CrudRepository,
};

#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn CrudRepository<Author>>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn CrudRepository<Author>>) -> Self {
        Self { authors }
    }

    pub async fn get_authors(&self, page: Page) -> AppResult<Vec<AuthorDto>> {
        let authors = self.authors.find_all(page).await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDto> {
        self.authors
            .find_by_id(id)
            .await?
            .map(AuthorDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Could not find author with id {}", id)))
    }

    pub async fn create_author(&self, dto: AuthorDto) -> AppResult<AuthorDto> {
        let created = self.authors.save(&Author::from(dto)).await?;
        tracing::info!("Author created: id={}", created.id);
        Ok(created.into())
    }

    /// Replace the author stored under `id`
    pub async fn update_author(&self, id: i32, dto: AuthorDto) -> AppResult<AuthorDto> {
        let author = Author { id, ..Author::from(dto) };
        if !self.authors.update(&author).await? {
            return Err(AppError::NotFound(format!("Could not find author with id {}", id)));
        }
        Ok(author.into())
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        if !self.authors.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Could not find author with id {}", id)));
        }
        Ok(())
    }
}
