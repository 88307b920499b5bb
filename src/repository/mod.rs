//! Repository layer: the in-memory book store

pub mod books;

/// Main repository struct holding every store of the process
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Repository whose book store starts with the fixed seed records
    pub fn seeded() -> Self {
        Self {
            books: books::BooksRepository::seeded(),
        }
    }

    /// Repository whose book store starts empty
    pub fn empty() -> Self {
        Self {
            books: books::BooksRepository::new(Vec::new()),
        }
    }
}
