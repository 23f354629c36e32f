//! Hierarchical projection of the flat item list
//!
//! The remote store only knows parent pointers. This module derives the
//! filesystem view on top of them:
//!
//! - `lineage`: root-first chain of ancestor ids for every item
//! - `PathIndex`: canonical path ↔ item mapping built from the lineages
//! - `Projection`: owns the items and both derived structures, and answers
//!   directory listings and single-path lookups
//!
//! A projection is built wholesale from one snapshot and never mutated.

pub mod lineage;
mod path_index;

pub use lineage::{resolve_lineages, ItemArena, Lineage};
pub use path_index::{PathIndex, SEPARATOR};

use std::collections::HashMap;

use serde::Serialize;

use crate::item::{Item, ItemId, ItemKind};
use crate::source::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("item fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("not found: {0}")]
    NotFound(String),
}

/// How an entry is presented in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Documents are files and collections are directories; any other kind
    /// has no place in a listing
    pub fn of(kind: &ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Document => Some(EntryKind::File),
            ItemKind::Collection => Some(EntryKind::Directory),
            ItemKind::Other(_) => None,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize)]
pub struct DirEntry<'a> {
    /// Display name of the backing item
    pub name: &'a str,
    /// Canonical path of the backing item
    pub path: &'a str,
    pub kind: EntryKind,
    pub item: &'a Item,
}

/// The path-indexed hierarchy derived from one item snapshot
#[derive(Debug, Clone)]
pub struct Projection {
    items: Vec<Item>,
    lineages: HashMap<ItemId, Lineage>,
    index: PathIndex,
}

impl Projection {
    /// Build the projection from a full item snapshot
    pub fn build(items: Vec<Item>) -> Self {
        let lineages = resolve_lineages(&items);
        let index = PathIndex::build(&items, &lineages);

        tracing::debug!(
            "built projection: {} items, {} paths",
            items.len(),
            index.len()
        );

        Self {
            items,
            lineages,
            index,
        }
    }

    /// List the directory at `dir`
    ///
    /// The empty path (after normalization) is the store root and lists every
    /// item without resolvable ancestors. A collection lists the items whose
    /// canonical path is exactly one segment below it. A document lists as
    /// itself.
    pub fn list(&self, dir: &str) -> Result<Vec<DirEntry<'_>>, ProjectionError> {
        let dir = PathIndex::normalize_path(dir);

        if dir.is_empty() {
            return Ok(self.list_root());
        }

        let position = self
            .index
            .get_item(&dir)
            .ok_or_else(|| ProjectionError::NotFound(dir.clone()))?;

        Ok(self.list_at(position, &dir))
    }

    /// List the item `id` the way `list` lists its canonical path
    ///
    /// Goes by identity, so it also reaches items no normalized path can
    /// address, e.g. a collection with an empty display name.
    pub fn list_item(&self, id: &str) -> Result<Vec<DirEntry<'_>>, ProjectionError> {
        let not_found = || ProjectionError::NotFound(id.to_string());
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(not_found)?;
        let path = self.index.get_path(id).ok_or_else(not_found)?;

        Ok(self.list_at(position, path))
    }

    /// Look up the item owning a canonical path
    pub fn resolve_item(&self, path: &str) -> Result<&Item, ProjectionError> {
        let path = PathIndex::normalize_path(path);
        self.index
            .get_item(&path)
            .map(|position| &self.items[position])
            .ok_or(ProjectionError::NotFound(path))
    }

    /// Lineage of an item, root first
    pub fn lineage(&self, id: &str) -> Option<&[ItemId]> {
        self.lineages.get(id).map(Vec::as_slice)
    }

    /// Canonical path of an item
    pub fn canonical_path(&self, id: &str) -> Option<&str> {
        self.index.get_path(id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn list_at(&self, position: usize, path: &str) -> Vec<DirEntry<'_>> {
        match self.items[position].kind {
            ItemKind::Document => self.entry(position).into_iter().collect(),
            ItemKind::Collection => self.list_children(path),
            ItemKind::Other(_) => Vec::new(),
        }
    }

    fn list_root(&self) -> Vec<DirEntry<'_>> {
        (0..self.items.len())
            .filter(|&position| {
                self.lineage(&self.items[position].id)
                    .is_some_and(|lineage| lineage.len() == 1)
            })
            .filter_map(|position| self.entry(position))
            .collect()
    }

    // matched on the path rather than the parent id so the listing is a pure
    // function of the index
    fn list_children(&self, dir: &str) -> Vec<DirEntry<'_>> {
        let prefix = format!("{}/", dir);

        (0..self.items.len())
            .filter(|&position| {
                let item = &self.items[position];
                self.index.get_path(&item.id).is_some_and(|path| {
                    path.strip_prefix(&prefix) == Some(item.name.as_str())
                        && self.index.owns(path, position)
                })
            })
            .filter_map(|position| self.entry(position))
            .collect()
    }

    fn entry(&self, position: usize) -> Option<DirEntry<'_>> {
        let item = &self.items[position];
        let kind = EntryKind::of(&item.kind)?;
        let path = self.index.get_path(&item.id)?;

        Some(DirEntry {
            name: &item.name,
            path,
            kind,
            item,
        })
    }
}

/// Strip the session root from a canonical path
///
/// An item sitting exactly at the root is presented by its display name.
/// Paths outside the root are returned unchanged.
pub fn strip_root_prefix(root: &str, canonical_path: &str, name: &str) -> String {
    let root = PathIndex::normalize_path(root);
    if root.is_empty() {
        return canonical_path.to_string();
    }
    if canonical_path == root {
        return name.to_string();
    }

    canonical_path
        .strip_prefix(&root)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
        .unwrap_or(canonical_path)
        .to_string()
}
