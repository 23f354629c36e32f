//! Session-scoped, lazily built projection
//!
//! A session fetches the item snapshot on first use, builds the projection
//! once and serves every later query from it. Concurrent first callers wait
//! on the single in-flight build instead of starting their own. A failed
//! fetch leaves the session unpopulated, so the next call tries again.
//! Nothing refreshes a populated session; remote changes show up only in a
//! new one.

use tokio::sync::OnceCell;

use crate::item::Item;
use crate::projection::{strip_root_prefix, DirEntry, PathIndex, Projection, ProjectionError};
use crate::source::ItemSource;

#[derive(Debug)]
pub struct Session<S> {
    source: S,
    root: String,
    inject_trash: bool,
    projection: OnceCell<Projection>,
}

impl<S: ItemSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            root: String::new(),
            inject_trash: true,
            projection: OnceCell::new(),
        }
    }

    /// Root the session at a store-relative directory
    pub fn with_root(mut self, root: &str) -> Self {
        self.root = PathIndex::normalize_path(root);
        self
    }

    /// Whether to add the virtual trash collection to the snapshot
    pub fn with_trash(mut self, inject_trash: bool) -> Self {
        self.inject_trash = inject_trash;
        self
    }

    /// Normalized root prefix, empty for the store root
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether the projection has been built yet
    pub fn is_populated(&self) -> bool {
        self.projection.initialized()
    }

    /// The projection, built on first call
    pub async fn projection(&self) -> Result<&Projection, ProjectionError> {
        self.projection
            .get_or_try_init(|| async move {
                tracing::info!("fetching item list");
                let mut items = self.source.fetch_all_items().await?;
                tracing::info!("fetched {} items", items.len());

                if self.inject_trash {
                    items.push(Item::trash());
                }

                Ok::<_, ProjectionError>(Projection::build(items))
            })
            .await
    }

    /// List a directory given relative to the session root
    pub async fn list(&self, dir: &str) -> Result<Vec<DirEntry<'_>>, ProjectionError> {
        let path = self.absolute_path(dir);
        self.projection().await?.list(&path)
    }

    /// List the entries below an item, addressed by id
    pub async fn list_item(&self, id: &str) -> Result<Vec<DirEntry<'_>>, ProjectionError> {
        self.projection().await?.list_item(id)
    }

    /// Resolve a single path given relative to the session root
    pub async fn resolve_item(&self, path: &str) -> Result<&Item, ProjectionError> {
        let path = self.absolute_path(path);
        self.projection().await?.resolve_item(&path)
    }

    /// Path of an item as presented below the session root
    ///
    /// `None` until the projection is built, or for an item it doesn't know.
    pub fn root_relative_path(&self, item: &Item) -> Option<String> {
        let canonical = self.projection.get()?.canonical_path(&item.id)?;
        Some(strip_root_prefix(&self.root, canonical, &item.name))
    }

    /// Join a root-relative path onto the session root
    pub fn absolute_path(&self, path: &str) -> String {
        PathIndex::join(&self.root, path)
    }
}
