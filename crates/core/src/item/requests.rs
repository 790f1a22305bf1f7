//! API request types for item operations.

use serde::{Deserialize, Serialize};

use super::types::Item;

/// Request payload for creating or replacing an item.
///
/// Both fields are required; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Attach a storage-assigned id, producing the stored representation.
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
