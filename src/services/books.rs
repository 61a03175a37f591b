//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDto, Page},
    repository::BookRepository,
};

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn get_books(&self, page: Page) -> AppResult<Vec<BookDto>> {
        let books = self.books.find_all(page).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDto> {
        self.books
            .find_by_id(id)
            .await?
            .map(BookDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Could not find book with id {}", id)))
    }

    pub async fn get_books_by_author(&self, author_id: i32) -> AppResult<Vec<BookDto>> {
        let books = self.books.find_by_author_id(author_id).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn get_books_by_tag(&self, tag_id: i32, page: Page) -> AppResult<Vec<BookDto>> {
        let books = self.books.find_by_tag_id(tag_id, page).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    /// Create a book and return it as stored, tag names included
    pub async fn create_book(&self, dto: BookDto) -> AppResult<BookDto> {
        let book = Book::try_from(dto)?;
        let created = self.books.save(&book).await?;
        tracing::info!("Book created: id={} tags={}", created.id, created.tags.len());

        self.books
            .find_by_id(created.id)
            .await?
            .map(BookDto::from)
            .ok_or_else(|| AppError::Internal(format!("Book {} vanished after creation", created.id)))
    }

    /// Replace the book stored under `id`, tag set included
    pub async fn update_book(&self, id: i32, dto: BookDto) -> AppResult<BookDto> {
        let book = Book {
            id,
            ..Book::try_from(dto)?
        };

        if !self.books.update(&book).await? {
            return Err(AppError::NotFound(format!("Could not find book with id {}", id)));
        }

        self.get_book(id).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        if !self.books.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Could not find book with id {}", id)));
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
