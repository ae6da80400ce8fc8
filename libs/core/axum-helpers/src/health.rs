//! Liveness endpoint shared by the binaries.

use axum::{Json, Router, routing::get};
use core_config::AppInfo;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: String,
    pub version: String,
}

/// Router exposing `GET /health`. Readiness stays app-specific since it
/// depends on what the app talks to.
pub fn health_router(info: AppInfo) -> Router {
    Router::new().route(
        "/health",
        get(move || async move {
            Json(HealthResponse {
                status: "ok",
                name: info.name.clone(),
                version: info.version.clone(),
            })
        }),
    )
}
