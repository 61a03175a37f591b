//! Tag management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Page, Tag, TagDto},
    repository::TagRepository,
};

#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn get_tags(&self, page: Page) -> AppResult<Vec<TagDto>> {
        let tags = self.tags.find_all(page).await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    pub async fn get_tag(&self, id: i32) -> AppResult<TagDto> {
        self.tags
            .find_by_id(id)
            .await?
            .map(TagDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Could not find tag with id {}", id)))
    }

    /// Tags attached to a book, ordered by id
    pub async fn get_book_tags(&self, book_id: i32) -> AppResult<Vec<TagDto>> {
        let tags = self.tags.find_by_book_id(book_id).await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    pub async fn create_tag(&self, dto: TagDto) -> AppResult<TagDto> {
        let created = self.tags.save(&Tag::from(dto)).await?;
        tracing::info!("Tag created: id={}", created.id);
        Ok(created.into())
    }

    pub async fn update_tag(&self, id: i32, dto: TagDto) -> AppResult<TagDto> {
        let tag = Tag { id, ..Tag::from(dto) };
        if !self.tags.update(&tag).await? {
            return Err(AppError::NotFound(format!("Could not find tag with id {}", id)));
        }
        Ok(tag.into())
    }

    pub async fn delete_tag(&self, id: i32) -> AppResult<()> {
        if !self.tags.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Could not find tag with id {}", id)));
        }
        Ok(())
    }
}
