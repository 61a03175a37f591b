//! Data models for the catalog

pub mod author;
pub mod book;
pub mod claims;
pub mod dto;
pub mod level;
pub mod page;
pub mod tag;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use claims::Claims;
pub use dto::{AuthorDto, BookDto, TagDto};
pub use level::Level;
pub use page::Page;
pub use tag::{Tag, TagSet};
