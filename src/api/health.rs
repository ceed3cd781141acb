//! Service info and health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct EndpointMap {
    pub livres: String,
    pub emprunteurs: String,
    pub emprunts: String,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub documentation: String,
    pub endpoints: EndpointMap,
}

/// Service landing page
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    )
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Bibliothèque library management API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documentation: "/docs".to_string(),
        endpoints: EndpointMap {
            livres: "/livres".to_string(),
            emprunteurs: "/emprunteurs".to_string(),
            emprunts: "/emprunts".to_string(),
        },
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<crate::AppState>,
) -> AppResult<Json<HealthResponse>> {
    state.services.check_ready().await?;
    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
