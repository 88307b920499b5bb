//! API handlers for the Library REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use std::any::Any;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::CorsConfig, error::AppError, AppState};

/// Public endpoints, in the order they are advertised
pub const ENDPOINTS: [(&str, &str); 8] = [
    ("GET /", "This welcome message"),
    ("GET /health", "Health check"),
    ("GET /api/books", "Get all books"),
    ("GET /api/books/<id>", "Get book by ID"),
    ("POST /api/books", "Create new book"),
    ("PUT /api/books/<id>", "Update book by ID"),
    ("DELETE /api/books/<id>", "Delete book by ID"),
    ("GET /api/info", "API information"),
];

/// Book id taken from the path.
///
/// Only non-negative integers address a book; any other segment means the
/// route itself does not exist.
pub struct BookId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::RouteNotFound)?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::RouteNotFound);
        }

        raw.parse().map(BookId).map_err(|_| AppError::RouteNotFound)
    }
}

/// JSON object body.
///
/// Missing bodies, invalid JSON and JSON that is not an object are all
/// rejected as malformed requests.
pub struct JsonObject<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::MalformedRequest)?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value)
                .map(JsonObject)
                .map_err(|_| AppError::MalformedRequest),
            _ => Err(AppError::MalformedRequest),
        }
    }
}

async fn endpoint_not_found() -> AppError {
    AppError::RouteNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Method fallback for book routes. The id is extracted first so a segment
/// that is not a book id stays an unknown route whatever the method.
async fn book_method_not_allowed(_: BookId) -> AppError {
    AppError::MethodNotAllowed
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::Internal(detail).into_response()
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(cors::Any).allow_headers(cors::Any);

    if config.allowed_origins.is_empty() {
        layer.allow_origin(cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        .route("/", get(health::welcome).fallback(method_not_allowed))
        .route("/health", get(health::health_check).fallback(method_not_allowed))
        .route(
            "/api/books",
            get(books::list_books)
                .post(books::create_book)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book)
                .fallback(book_method_not_allowed),
        )
        .route("/api/info", get(health::api_info).fallback(method_not_allowed))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .fallback(endpoint_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
