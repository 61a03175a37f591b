//! Caller identity endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AuthenticatedUser;

/// Identity derived from the caller's token
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub subject: String,
    pub username: Option<String>,
    /// `ROLE_*` and `SCOPE_*` authorities
    pub authorities: Vec<String>,
}

/// Get the authenticated caller
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller identity", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<UserInfo> {
    let authorities = claims.authorities();
    Json(UserInfo {
        subject: claims.sub,
        username: claims.preferred_username,
        authorities,
    })
}
