//! Core types for the shelf item service.
//!
//! Pure data and contracts only: the item model, the repository trait the
//! HTTP layer talks to, and the error taxonomy shared by every storage backend.

pub mod item;
pub mod storage;
