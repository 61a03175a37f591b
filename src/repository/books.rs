//! Books repository.
//!
//! A book is loaded and saved together with its tag set. Reads are a single
//! left-joined query folded by [`BookFolder`]; writes run in one transaction
//! and reconcile `book_tags` with a [`TagDiff`] instead of rewriting it.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{postgres::PgArguments, query::QueryAs, PgConnection, Pool, Postgres};
use tokio_stream::StreamExt;

use super::{
    folding::{BookFolder, BookTagRow, RowFolder, BOOK_TAG_COLUMNS},
    tag_diff::TagDiff,
    BookRepository, CrudRepository,
};
use crate::{
    error::AppResult,
    models::{Book, Page},
};

const BOOK_TAG_JOIN: &str = "book b \
     LEFT JOIN book_tags bt ON bt.book_id = b.id \
     LEFT JOIN tag t ON t.id = bt.tag_id";

type BookTagQuery<'q> = QueryAs<'q, Postgres, BookTagRow, PgArguments>;

fn select_books(filter: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} ORDER BY b.id, t.id",
        BOOK_TAG_COLUMNS, BOOK_TAG_JOIN, filter
    )
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Stream the rows of `query` through a fresh folder
    async fn load(&self, query: BookTagQuery<'_>) -> AppResult<Vec<Book>> {
        let mut rows = query.fetch(&self.pool);
        let mut folder = BookFolder::new();
        while let Some(row) = rows.next().await {
            folder.fold_row(row?);
        }
        Ok(folder.finish())
    }

    async fn current_tag_ids(conn: &mut PgConnection, book_id: i32) -> AppResult<HashSet<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT tag_id FROM book_tags WHERE book_id = $1")
            .bind(book_id)
            .fetch_all(conn)
            .await?;
        Ok(ids.into_iter().collect())
    }

    async fn insert_book_tags(conn: &mut PgConnection, book_id: i32, tag_ids: &[i32]) -> AppResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query("INSERT INTO book_tags (book_id, tag_id) SELECT $1, UNNEST($2::int4[])")
            .bind(book_id)
            .bind(tag_ids)
            .execute(conn)
            .await?;
        Ok(())
    }

    async fn delete_book_tags(conn: &mut PgConnection, book_id: i32, tag_ids: &[i32]) -> AppResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query("DELETE FROM book_tags WHERE book_id = $1 AND tag_id = ANY($2)")
            .bind(book_id)
            .bind(tag_ids)
            .execute(conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CrudRepository<Book> for BooksRepository {
    async fn find_all(&self, page: Page) -> AppResult<Vec<Book>> {
        let sql = select_books("b.id IN (SELECT id FROM book ORDER BY id LIMIT $1 OFFSET $2)");
        let query = sqlx::query_as::<_, BookTagRow>(&sql)
            .bind(page.limit())
            .bind(page.offset());
        self.load(query).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let sql = select_books("b.id = $1");
        let query = sqlx::query_as::<_, BookTagRow>(&sql).bind(id);
        Ok(self.load(query).await?.into_iter().next())
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO book (title, author_id, publication_year, isbn, level, description, available)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(book.publication_year)
        .bind(&book.isbn)
        .bind(book.level)
        .bind(&book.description)
        .bind(book.available)
        .fetch_one(&mut *tx)
        .await?;

        let mut tag_ids: Vec<i32> = book.tags.ids().into_iter().collect();
        tag_ids.sort_unstable();
        Self::insert_book_tags(&mut tx, id, &tag_ids).await?;

        tx.commit().await?;

        tracing::debug!(book_id = id, tags = tag_ids.len(), "Book created");

        Ok(Book { id, ..book.clone() })
    }

    async fn update(&self, book: &Book) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Takes the row lock on the book, later updates of the same id wait for this commit
        let result = sqlx::query(
            r#"
            UPDATE book SET
                title = $1,
                author_id = $2,
                publication_year = $3,
                isbn = $4,
                level = $5,
                description = $6,
                available = $7
            WHERE id = $8
            "#,
        )
        .bind(&book.title)
        .bind(book.author_id)
        .bind(book.publication_year)
        .bind(&book.isbn)
        .bind(book.level)
        .bind(&book.description)
        .bind(book.available)
        .bind(book.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let current = Self::current_tag_ids(&mut tx, book.id).await?;
        let diff = TagDiff::between(&current, &book.tags.ids());

        Self::delete_book_tags(&mut tx, book.id, &diff.to_remove).await?;
        Self::insert_book_tags(&mut tx, book.id, &diff.to_add).await?;

        tx.commit().await?;

        tracing::debug!(
            book_id = book.id,
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "Book updated"
        );

        Ok(true)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_tags WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() >= 1)
    }
}

#[async_trait]
impl BookRepository for BooksRepository {
    async fn find_by_author_id(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let sql = select_books("b.author_id = $1");
        let query = sqlx::query_as::<_, BookTagRow>(&sql).bind(author_id);
        self.load(query).await
    }

    async fn find_by_tag_id(&self, tag_id: i32, page: Page) -> AppResult<Vec<Book>> {
        // Page over the tagged books, then load each with its complete tag set
        let sql = select_books(
            "b.id IN (SELECT book_id FROM book_tags WHERE tag_id = $1 \
             ORDER BY book_id LIMIT $2 OFFSET $3)",
        );
        let query = sqlx::query_as::<_, BookTagRow>(&sql)
            .bind(tag_id)
            .bind(page.limit())
            .bind(page.offset());
        self.load(query).await
    }
}
