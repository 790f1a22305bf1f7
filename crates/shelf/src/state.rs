//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds the item repository as a trait object so the
//! handlers never see which storage backend is behind it.

use std::sync::Arc;

use shelf_core::storage::ItemRepository;

use crate::{
    config::Config,
    storage::{SessionFactory, SqliteRepository},
};

/// Shared application state.
///
/// Built once at startup and cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Item repository. Each call runs in its own storage session.
    pub item_repo: Arc<dyn ItemRepository>,
}

impl AppState {
    /// Creates AppState backed by the SQLite file named in the configuration.
    ///
    /// Runs the schema bootstrap, so a database that cannot be opened fails
    /// here rather than on the first request.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let path = config.database_path()?;
        let sessions = SessionFactory::new(path, config.busy_timeout());
        let sqlite_repo = SqliteRepository::new(sessions).await?;

        Ok(Self::with_repository(Arc::new(sqlite_repo)))
    }

    /// Creates AppState around an existing repository.
    pub fn with_repository(item_repo: Arc<dyn ItemRepository>) -> Self {
        Self { item_repo }
    }
}

// ============================================================================
// Test support
// ============================================================================
