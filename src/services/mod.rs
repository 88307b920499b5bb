//! Business logic services

pub mod books;
pub mod validation;

use crate::{config::LibraryConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, library_config: &LibraryConfig) -> Self {
        Self {
            books: books::BooksService::new(repository, library_config.year_horizon),
        }
    }
}
