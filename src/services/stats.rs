//! Dashboard statistics service

use std::sync::Arc;

use chrono::Utc;

use crate::{error::AppResult, models::DashboardStats, repository::LibraryStore};

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn LibraryStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Library-wide counters as of now
    pub async fn get_stats(&self) -> AppResult<DashboardStats> {
        self.store.dashboard_stats(Utc::now()).await
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
