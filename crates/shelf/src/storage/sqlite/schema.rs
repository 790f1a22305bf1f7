//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the items table and its indexes.
///
/// Idempotent: safe to run on every start against an existing database.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS ix_items_name ON items(name);
CREATE INDEX IF NOT EXISTS ix_items_description ON items(description);
"#;

pub const SELECT_ITEMS: &str = r#"
SELECT id, name, description
FROM items
ORDER BY id ASC
"#;

pub const SELECT_ITEM_BY_ID: &str = r#"
SELECT id, name, description
FROM items
WHERE id = ?1
"#;

pub const INSERT_ITEM: &str = r#"
INSERT INTO items (name, description)
VALUES (?1, ?2)
RETURNING id, name, description
"#;

// A single statement, so the existence check and the write cannot interleave
// with another session.
pub const UPDATE_ITEM: &str = r#"
UPDATE items
SET name = ?2, description = ?3
WHERE id = ?1
RETURNING id, name, description
"#;

pub const DELETE_ITEM: &str = r#"
DELETE FROM items
WHERE id = ?1
"#;
