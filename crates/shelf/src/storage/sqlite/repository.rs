//! SQLite repository implementation.
//!
//! Implements `ItemRepository` from `shelf_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::OptionalExtension;

use shelf_core::item::{Item, ItemInput};
use shelf_core::storage::{ItemRepository, Result};

use super::conversions::row_to_item;
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;
use super::session::SessionFactory;

const ENTITY: &str = "Item";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based item repository.
///
/// Holds no connection of its own: every operation acquires a session from
/// the factory and releases it before returning, on success and failure alike.
pub struct SqliteRepository {
    sessions: SessionFactory,
}

impl SqliteRepository {
    /// Creates a repository, creating the schema if it doesn't exist yet.
    pub async fn new(sessions: SessionFactory) -> Result<Self> {
        let repo = Self { sessions };
        repo.init_schema().await?;

        tracing::info!(path = %repo.sessions.path().display(), "Item schema ready");

        Ok(repo)
    }

    #[cfg(test)]
    pub fn sessions(&self) -> &SessionFactory {
        &self.sessions
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        self.run(None, |conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
    }

    /// Runs one unit of work in a fresh session.
    async fn run<F, R>(&self, id: Option<i64>, function: F) -> Result<R>
    where
        F: FnOnce(&mut rusqlite::Connection) -> std::result::Result<R, tokio_rusqlite::Error>
            + Send
            + 'static,
        R: Send + 'static,
    {
        let session = self.sessions.acquire().await?;
        let result = session.call(function).await;
        self.sessions.release(session).await;

        result.map_err(|e| match id {
            Some(id) => map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()),
            None => map_tokio_rusqlite_error(e, ENTITY),
        })
    }
}

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn list_items(&self) -> Result<Vec<Item>> {
        self.run(None, |conn| {
            let mut stmt = conn.prepare(schema::SELECT_ITEMS).map_err(wrap_err)?;
            let rows = stmt.query_map([], row_to_item).map_err(wrap_err)?;

            let mut items = Vec::new();
            for row_result in rows {
                items.push(row_result.map_err(wrap_err)?);
            }
            Ok(items)
        })
        .await
    }

    async fn create_item(&self, input: &ItemInput) -> Result<Item> {
        let name = input.name.clone();
        let description = input.description.clone();

        self.run(None, move |conn| {
            conn.query_row(
                schema::INSERT_ITEM,
                rusqlite::params![name, description],
                row_to_item,
            )
            .map_err(wrap_err)
        })
        .await
    }

    async fn get_item(&self, id: i64) -> Result<Option<Item>> {
        self.run(Some(id), move |conn| {
            conn.query_row(schema::SELECT_ITEM_BY_ID, [id], row_to_item)
                .optional()
                .map_err(wrap_err)
        })
        .await
    }

    async fn update_item(&self, id: i64, input: &ItemInput) -> Result<Item> {
        let name = input.name.clone();
        let description = input.description.clone();

        // No returned row means no item with this id.
        self.run(Some(id), move |conn| {
            conn.query_row(
                schema::UPDATE_ITEM,
                rusqlite::params![id, name, description],
                row_to_item,
            )
            .map_err(wrap_err)
        })
        .await
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.run(Some(id), move |conn| {
            let rows = conn.execute(schema::DELETE_ITEM, [id]).map_err(wrap_err)?;
            if rows == 0 {
                Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
            } else {
                Ok(())
            }
        })
        .await
    }
}
