//! Bidirectional canonical path ↔ item mapping
//!
//! Paths are the `/`-joined display names along an item's lineage, without a
//! leading or trailing separator. Items are referred to by their position in
//! the projection's item list.

use std::collections::HashMap;

use crate::item::{Item, ItemId};

use super::lineage::{ItemArena, Lineage};

/// Path separator used in canonical paths
pub const SEPARATOR: char = '/';

/// Bidirectional mapping between canonical paths and items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathIndex {
    /// Canonical path to position in the item list
    path_to_item: HashMap<String, usize>,
    /// Item id to canonical path
    item_to_path: HashMap<ItemId, String>,
}

impl PathIndex {
    /// Build the index from the item list and its lineages
    ///
    /// Items are visited in list order. When two items share a path (siblings
    /// with the same display name) the one visited last owns it; both keep
    /// their own canonical path.
    pub fn build(items: &[Item], lineages: &HashMap<ItemId, Lineage>) -> Self {
        let arena = ItemArena::new(items);
        let mut index = Self::default();

        for (position, item) in items.iter().enumerate() {
            let Some(lineage) = lineages.get(&item.id) else {
                continue;
            };
            let path = Self::join_lineage(&arena, lineage);

            if let Some(previous) = index.path_to_item.insert(path.clone(), position) {
                if previous != position {
                    tracing::debug!(
                        "path {} claimed by item {} over item {}",
                        path,
                        item.id,
                        items[previous].id
                    );
                }
            }
            index.item_to_path.insert(item.id.clone(), path);
        }

        index
    }

    /// Position of the item owning a canonical path
    pub fn get_item(&self, path: &str) -> Option<usize> {
        self.path_to_item.get(path).copied()
    }

    /// Canonical path of an item
    pub fn get_path(&self, id: &str) -> Option<&str> {
        self.item_to_path.get(id).map(String::as_str)
    }

    /// Whether `position` is the item that owns `path`
    pub fn owns(&self, path: &str, position: usize) -> bool {
        self.get_item(path) == Some(position)
    }

    /// Iterate over every (path, position) entry
    pub fn paths(&self) -> impl Iterator<Item = (&str, usize)> {
        self.path_to_item
            .iter()
            .map(|(path, position)| (path.as_str(), *position))
    }

    pub fn len(&self) -> usize {
        self.path_to_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path_to_item.is_empty()
    }

    /// Join the display names along a lineage
    fn join_lineage(arena: &ItemArena<'_>, lineage: &[ItemId]) -> String {
        lineage
            .iter()
            .filter_map(|id| arena.get(id))
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Normalize a requested path into canonical form
    ///
    /// Leading, trailing and repeated separators are dropped; the empty
    /// string stands for the store root. Whitespace is part of a display
    /// name and is kept.
    pub fn normalize_path(path: &str) -> String {
        Self::segments(path).collect::<Vec<_>>().join("/")
    }

    /// Non-empty segments of a path
    pub fn segments(path: &str) -> impl Iterator<Item = &str> {
        path.split(SEPARATOR).filter(|segment| !segment.is_empty())
    }

    /// Join two paths, either of which may be empty
    pub fn join(base: &str, path: &str) -> String {
        Self::segments(base)
            .chain(Self::segments(path))
            .collect::<Vec<_>>()
            .join("/")
    }
}
