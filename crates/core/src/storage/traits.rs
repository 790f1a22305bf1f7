use async_trait::async_trait;

use crate::item::{Item, ItemInput};

use super::Result;

/// Repository for item operations.
///
/// Every call is one unit of work against a single row (or, for
/// `list_items`, a single read of the whole table).
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Gets every item, ordered by ascending id.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Inserts a new item and returns it with its generated id.
    async fn create_item(&self, input: &ItemInput) -> Result<Item>;

    /// Gets an item by its ID.
    async fn get_item(&self, id: i64) -> Result<Option<Item>>;

    /// Overwrites both fields of an existing item.
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    async fn update_item(&self, id: i64, input: &ItemInput) -> Result<Item>;

    /// Deletes an item by its ID.
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    async fn delete_item(&self, id: i64) -> Result<()>;
}
