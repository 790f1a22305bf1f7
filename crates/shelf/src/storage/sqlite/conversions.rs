//! SQLite row conversion functions.

use rusqlite::Row;
use shelf_core::item::Item;

/// Convert a SQLite row to an Item.
///
/// Expected columns: id, name, description
pub fn row_to_item(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
