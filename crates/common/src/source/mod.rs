pub mod memory;
mod provider;

pub use memory::MemoryItemSource;
pub use provider::{FetchError, ItemSource};
