//! Tags repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{CrudRepository, TagRepository};
use crate::{
    error::AppResult,
    models::{Page, Tag},
};

#[derive(Clone)]
pub struct TagsRepository {
    pool: Pool<Postgres>,
}

impl TagsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Tag> for TagsRepository {
    async fn find_all(&self, page: Page) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, Tag>("SELECT id, name FROM tag ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Tag>> {
        let row = sqlx::query_as::<_, Tag>("SELECT id, name FROM tag WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, tag: &Tag) -> AppResult<Tag> {
        let row = sqlx::query_as::<_, Tag>("INSERT INTO tag (name) VALUES ($1) RETURNING id, name")
            .bind(&tag.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, tag: &Tag) -> AppResult<bool> {
        let result = sqlx::query("UPDATE tag SET name = $1 WHERE id = $2")
            .bind(&tag.name)
            .bind(tag.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tag WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() >= 1)
    }
}

#[async_trait]
impl TagRepository for TagsRepository {
    async fn find_by_book_id(&self, book_id: i32) -> AppResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM tag t
            JOIN book_tags bt ON bt.tag_id = t.id
            WHERE bt.book_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
