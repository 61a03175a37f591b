//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::CrudRepository;
use crate::{
    error::AppResult,
    models::{Author, Page},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Author> for AuthorsRepository {
    async fn find_all(&self, page: Page) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, name, biography FROM author ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT id, name, biography FROM author WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, author: &Author) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO author (name, biography)
            VALUES ($1, $2)
            RETURNING id, name, biography
            "#,
        )
        .bind(&author.name)
        .bind(&author.biography)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, author: &Author) -> AppResult<bool> {
        let result = sqlx::query("UPDATE author SET name = $1, biography = $2 WHERE id = $3")
            .bind(&author.name)
            .bind(&author.biography)
            .bind(author.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM author WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() >= 1)
    }
}
