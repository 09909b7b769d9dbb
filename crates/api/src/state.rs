use std::sync::Arc;

use crewhub_core::recruitment::{RecruitmentService, RecruitmentStore};

use crate::config::ServerConfig;

/// Shared application state available to all handlers via Axum's `State` extractor.
///
/// Generic over the store so the binary runs on PostgreSQL while the
/// integration tests drive the same router over the in-memory store.
pub struct AppState<S> {
    /// Recruitment workflow over the configured store.
    pub service: Arc<RecruitmentService<S>>,
    /// Server configuration (JWT settings, timeouts, etc.).
    pub config: Arc<ServerConfig>,
}

impl<S: RecruitmentStore> AppState<S> {
    pub fn new(store: S, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(RecruitmentService::new(store)),
            config: Arc::new(config),
        }
    }
}

// Derived `Clone` would demand `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
        }
    }
}
