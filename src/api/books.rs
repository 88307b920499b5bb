//! Book catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookPayload},
    AppState,
};

use super::{BookId, JsonObject};

/// Every book in the catalog
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    /// Number of books returned
    pub count: usize,
}

/// A created or updated book
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

/// The record removed by a delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedBookResponse {
    pub message: String,
    pub deleted_book: Book,
}

/// Get all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in insertion order", body = BookListResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<BookListResponse> {
    let books = state.services.books.list().await;
    Json(BookListResponse {
        count: books.len(),
        books,
    })
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Missing body or validation failure", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonObject(payload): JsonObject<BookPayload>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Book created successfully".to_string(),
            book,
        }),
    ))
}

/// Update book fields; fields left out keep their value
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Missing body or validation failure", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    JsonObject(payload): JsonObject<BookPayload>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(id, payload).await?;
    Ok(Json(BookResponse {
        message: "Book updated successfully".to_string(),
        book,
    }))
}

/// Delete a book by ID
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeletedBookResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<DeletedBookResponse>> {
    let deleted_book = state.services.books.delete(id).await?;
    Ok(Json(DeletedBookResponse {
        message: format!("Book with ID {} deleted successfully", id),
        deleted_book,
    }))
}
