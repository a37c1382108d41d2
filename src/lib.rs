//! Library Management System server
//!
//! REST JSON API over the library's document store: per-book and
//! per-student borrow analytics, and dashboard statistics.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the services over `store` using the given configuration
    pub fn new(config: AppConfig, store: Arc<dyn repository::LibraryStore>) -> Self {
        let services = services::Services::new(store, config.photos.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
