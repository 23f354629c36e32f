//! Core of rmfs: a hierarchical filesystem view over a flat, parent-linked
//! remote document store.
//!
//! - [`item`]: items as the remote store reports them
//! - [`source`]: where the item snapshot comes from
//! - [`projection`]: lineages, the path index and directory listing
//! - [`session`]: lazily built, cached projection for one session

pub mod item;
pub mod projection;
pub mod session;
pub mod source;

pub use item::{Item, ItemId, ItemKind};
pub use projection::{DirEntry, EntryKind, Projection, ProjectionError};
pub use session::Session;
pub use source::{FetchError, ItemSource, MemoryItemSource};
