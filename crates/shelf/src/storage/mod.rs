//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `shelf_core::storage`.

pub mod sqlite;

pub use sqlite::{SessionFactory, SqliteRepository};
