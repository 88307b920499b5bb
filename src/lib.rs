//! Library API
//!
//! A REST JSON service managing a single in-memory catalog of books:
//! listing, lookup, creation with validation, partial updates and deletion.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use crate::{config::LoggingConfig, repository::Repository, services::Services};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    /// Build the state for one process: a single store, seeded unless
    /// configured otherwise.
    pub fn new(config: AppConfig) -> Self {
        let repository = if config.library.seed {
            Repository::seeded()
        } else {
            Repository::empty()
        };
        let services = Services::new(repository, &config.library);

        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Output goes to
/// stderr so stdout stays free for the gateway binary's response.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_api={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
