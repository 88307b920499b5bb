//! Book catalog service

use chrono::{Datelike, Utc};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload},
    repository::Repository,
};

use super::validation::{BookValidator, ValidationMode};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    year_horizon: i64,
}

impl BooksService {
    pub fn new(repository: Repository, year_horizon: i64) -> Self {
        Self {
            repository,
            year_horizon,
        }
    }

    /// Validator bound to today's calendar year
    fn validator(&self) -> BookValidator {
        BookValidator::new(i64::from(Utc::now().year()), self.year_horizon)
    }

    fn check(&self, payload: &BookPayload, mode: ValidationMode) -> AppResult<()> {
        let errors = self.validator().validate(payload, mode);
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?errors, "Book payload rejected");
            Err(AppError::Validation(errors))
        }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Create a book from a payload that must carry every field
    pub async fn create(&self, payload: BookPayload) -> AppResult<Book> {
        self.check(&payload, ValidationMode::Strict)?;

        let fields = payload
            .to_new_book()
            .ok_or_else(|| AppError::Internal("validated payload could not be converted".to_string()))?;

        Ok(self.repository.books.create(fields).await)
    }

    /// Apply the supplied fields of `payload` to book `id`.
    ///
    /// A missing book is reported before any validation error.
    pub async fn update(&self, id: i64, payload: BookPayload) -> AppResult<Book> {
        self.get(id).await?;
        self.check(&payload, ValidationMode::Partial)?;

        self.repository
            .books
            .update(id, payload.to_changes())
            .await
            .ok_or_else(|| AppError::book_not_found(id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .delete(id)
            .await
            .ok_or_else(|| AppError::book_not_found(id))
    }
}
