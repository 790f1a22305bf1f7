mod requests;
mod types;

pub use requests::ItemInput;
pub use types::Item;
