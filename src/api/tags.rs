//! Tag endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Page, TagDto},
};

use super::AuthenticatedUser;

/// List tags, one page at a time
#[utoipa::path(
    get,
    path = "/tags",
    tag = "tags",
    security(("bearer_auth" = [])),
    params(Page),
    responses(
        (status = 200, description = "Page of tags", body = Vec<TagDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tags(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(page): Query<Page>,
) -> AppResult<Json<Vec<TagDto>>> {
    let tags = state.services.tags.get_tags(page.validate()?).await?;
    Ok(Json(tags))
}

/// Get tag by ID
#[utoipa::path(
    get,
    path = "/tags/{id}",
    tag = "tags",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag details", body = TagDto),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TagDto>> {
    let tag = state.services.tags.get_tag(id).await?;
    Ok(Json(tag))
}

/// Tags attached to a book
#[utoipa::path(
    get,
    path = "/books/{id}/tags",
    tag = "tags",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Tags of the book, empty if none", body = Vec<TagDto>)
    )
)]
pub async fn list_book_tags(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Vec<TagDto>>> {
    let tags = state.services.tags.get_book_tags(book_id).await?;
    Ok(Json(tags))
}

/// Create a new tag
#[utoipa::path(
    post,
    path = "/tags",
    tag = "tags",
    security(("bearer_auth" = [])),
    request_body = TagDto,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 409, description = "Tag name already taken")
    )
)]
pub async fn create_tag(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(tag): Json<TagDto>,
) -> AppResult<(StatusCode, Json<TagDto>)> {
    claims.require_write()?;

    let created = state.services.tags.create_tag(tag).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a tag
#[utoipa::path(
    put,
    path = "/tags/{id}",
    tag = "tags",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    request_body = TagDto,
    responses(
        (status = 200, description = "Tag updated", body = TagDto),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn update_tag(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(tag): Json<TagDto>,
) -> AppResult<Json<TagDto>> {
    claims.require_write()?;

    let updated = state.services.tags.update_tag(id, tag).await?;
    Ok(Json(updated))
}

/// Delete a tag, detaching it from every book
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "tags",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.tags.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
