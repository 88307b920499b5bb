//! Books repository
//!
//! The store keeps records in insertion order and hands out ids from a
//! counter that only moves forward, so ids are never reused after a delete.
//! All access goes through one `RwLock`; every mutation holds the write lock
//! for its whole duration.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::book::{Book, BookChanges, NewBook};

/// Records present when the process starts
pub fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: "To Kill a Mockingbird".to_string(),
            author: "Harper Lee".to_string(),
            genre: "Fiction".to_string(),
            year: 1960,
        },
        Book {
            id: 2,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            genre: "Dystopian Fiction".to_string(),
            year: 1949,
        },
        Book {
            id: 3,
            title: "Pride and Prejudice".to_string(),
            author: "Jane Austen".to_string(),
            genre: "Romance".to_string(),
            year: 1813,
        },
    ]
}

#[derive(Debug)]
pub struct BookStore {
    books: Vec<Book>,
    next_id: i64,
}

impl BookStore {
    pub fn new(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self { books, next_id }
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn create(&mut self, fields: NewBook) -> Book {
        let book = Book {
            id: self.next_id,
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            year: fields.year,
        };
        self.next_id += 1;
        self.books.push(book.clone());
        book
    }

    pub fn update(&mut self, id: i64, changes: BookChanges) -> Option<Book> {
        let book = self.books.iter_mut().find(|b| b.id == id)?;
        book.apply(changes);
        Some(book.clone())
    }

    pub fn delete(&mut self, id: i64) -> Option<Book> {
        let index = self.books.iter().position(|b| b.id == id)?;
        Some(self.books.remove(index))
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<RwLock<BookStore>>,
}

impl BooksRepository {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            store: Arc::new(RwLock::new(BookStore::new(books))),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_books())
    }

    /// Get a book by ID
    pub async fn find_by_id(&self, id: i64) -> Option<Book> {
        self.store.read().await.find_by_id(id).cloned()
    }

    /// All books in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.store.read().await.list().to_vec()
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Insert a new book under the next id
    pub async fn create(&self, fields: NewBook) -> Book {
        let book = self.store.write().await.create(fields);
        tracing::info!(book_id = book.id, "Book created");
        book
    }

    /// Apply the supplied fields to an existing book
    pub async fn update(&self, id: i64, changes: BookChanges) -> Option<Book> {
        let updated = self.store.write().await.update(id, changes);
        if updated.is_some() {
            tracing::info!(book_id = id, "Book updated");
        }
        updated
    }

    /// Remove a book, returning what was removed
    pub async fn delete(&self, id: i64) -> Option<Book> {
        let removed = self.store.write().await.delete(id);
        if removed.is_some() {
            tracing::info!(book_id = id, "Book deleted");
        }
        removed
    }
}
