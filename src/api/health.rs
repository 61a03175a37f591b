//! Liveness and readiness probes

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Probe answer of the catalog service
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeStatus {
    /// `up` for liveness, `ready` once the catalog database answers
    pub status: String,
    pub version: String,
}

impl ProbeStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The process is up; no dependency is checked
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Catalog process is up", body = ProbeStatus)
    )
)]
pub async fn health_check() -> Json<ProbeStatus> {
    Json(ProbeStatus::new("up"))
}

/// The catalog database accepts queries
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Catalog database reachable", body = ProbeStatus),
        (status = 500, description = "Catalog database unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn readiness_check(State(state): State<crate::AppState>) -> AppResult<Json<ProbeStatus>> {
    state.repository.ping().await?;
    Ok(Json(ProbeStatus::new("ready")))
}
