//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{BookDto, Page},
};

use super::AuthenticatedUser;

/// List books with their tags, one page at a time
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(Page),
    responses(
        (status = 200, description = "Page of books", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<Page>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.get_books(page.validate()?).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book with its tags", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

/// Books written by an author
#[utoipa::path(
    get,
    path = "/books/author/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Books of the author", body = Vec<BookDto>)
    )
)]
pub async fn list_books_by_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(author_id): Path<i32>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.get_books_by_author(author_id).await?;
    Ok(Json(books))
}

/// Books carrying a tag, each with its full tag set
#[utoipa::path(
    get,
    path = "/books/tag/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tag ID"),
        Page
    ),
    responses(
        (status = 200, description = "Page of tagged books", body = Vec<BookDto>)
    )
)]
pub async fn list_books_by_tag(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(tag_id): Path<i32>,
    Query(page): Query<Page>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.get_books_by_tag(tag_id, page.validate()?).await?;
    Ok(Json(books))
}

/// Create a new book together with its tag set
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Unknown level"),
        (status = 409, description = "Unknown author or tag")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<BookDto>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    claims.require_write()?;

    let created = state.services.books.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a book; its tag set becomes exactly the submitted one
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Unknown level"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Unknown author or tag")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(book): Json<BookDto>,
) -> AppResult<Json<BookDto>> {
    claims.require_write()?;

    let updated = state.services.books.update_book(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book and its tag associations
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
