//! Wire shapes and their conversions to and from the domain models.
//!
//! Conversions are plain field copies. The only fallible step is parsing the
//! book level name, which fails with `AppError::InvalidArgument`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{author::Author, book::Book, level::Level, tag::Tag};
use crate::error::AppError;

/// Author as exchanged over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub biography: String,
}

/// Tag as exchanged over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

/// Book with its tags as exchanged over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(default)]
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub publication_year: i32,
    pub isbn: String,
    /// One of BEGINNER, INTERMEDIATE, ADVANCED
    pub level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub tags: Vec<TagDto>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            biography: author.biography,
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            biography: dto.biography,
        }
    }
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

impl From<TagDto> for Tag {
    fn from(dto: TagDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author_id: book.author_id,
            publication_year: book.publication_year,
            isbn: book.isbn,
            level: book.level.into(),
            description: book.description,
            available: book.available,
            tags: book.tags.into_iter().map(TagDto::from).collect(),
        }
    }
}

impl TryFrom<BookDto> for Book {
    type Error = AppError;

    fn try_from(dto: BookDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            title: dto.title,
            author_id: dto.author_id,
            publication_year: dto.publication_year,
            isbn: dto.isbn,
            level: dto.level.parse::<Level>()?,
            description: dto.description,
            available: dto.available,
            tags: dto.tags.into_iter().map(Tag::from).collect(),
        })
    }
}
