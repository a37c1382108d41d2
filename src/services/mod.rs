//! Business logic services

pub mod analytics;
pub mod photos;
pub mod stats;

use std::sync::Arc;

use crate::{config::PhotosConfig, repository::LibraryStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub analytics: analytics::AnalyticsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn LibraryStore>, photos_config: PhotosConfig) -> Self {
        Self {
            analytics: analytics::AnalyticsService::new(
                store.clone(),
                photos::PhotoResolver::new(photos_config),
            ),
            stats: stats::StatsService::new(store),
        }
    }
}
