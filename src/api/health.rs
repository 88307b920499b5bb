//! Health, welcome and metadata endpoints

use axum::{extract::State, Json};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

use super::ENDPOINTS;

const PROJECT_NAME: &str = "Library API";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `OK` while the process serves requests
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub description: String,
    /// Route to short description, in advertised order
    #[schema(value_type = Object)]
    pub endpoints: IndexMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InfoResponse {
    pub project_name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    /// Books currently in the catalog
    pub total_books: usize,
    pub endpoints_count: usize,
    pub created: String,
}

/// Welcome message listing every endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse)
    )
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to the {}", PROJECT_NAME),
        description: "A complete CRUD system for managing books".to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(route, what)| (route.to_string(), what.to_string()))
            .collect(),
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
        status: "OK".to_string(),
    })
}

/// API metadata with the live book count
#[utoipa::path(
    get,
    path = "/api/info",
    tag = "health",
    responses(
        (status = 200, description = "API information", body = InfoResponse)
    )
)]
pub async fn api_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        project_name: PROJECT_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        author: "Library API Team".to_string(),
        description: "A REST API for managing books with CRUD operations".to_string(),
        total_books: state.services.books.count().await,
        endpoints_count: ENDPOINTS.len(),
        created: "2024".to_string(),
    })
}
