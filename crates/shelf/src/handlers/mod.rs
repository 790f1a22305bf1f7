pub mod error;
pub mod items;
pub mod root;

pub use error::AppError;
