//! Lineage resolution over the flat item list
//!
//! A lineage is the root-first chain of ids leading down to an item, ending
//! with the item's own id. Parent pointers come straight off the network, so
//! the walk stops quietly on a dangling parent and bounds itself against
//! cycles instead of trusting the data to form a forest.

use std::collections::{HashMap, HashSet};

use crate::item::{Item, ItemId};

/// Root-first ancestor ids, ending with the item itself
pub type Lineage = Vec<ItemId>;

/// Id → item lookup built once per rebuild
///
/// Duplicate ids resolve to the item that appears last.
#[derive(Debug)]
pub struct ItemArena<'a> {
    by_id: HashMap<&'a str, &'a Item>,
}

impl<'a> ItemArena<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        let by_id = items.iter().map(|item| (item.id.as_str(), item)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Item> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Compute the lineage of every item
pub fn resolve_lineages(items: &[Item]) -> HashMap<ItemId, Lineage> {
    let arena = ItemArena::new(items);
    items
        .iter()
        .map(|item| (item.id.clone(), resolve_one(&arena, item)))
        .collect()
}

/// Walk the parent pointers of a single item
///
/// The walk ends at an empty parent, at a parent id the arena doesn't know,
/// or when the chain would revisit an id or grow past the arena size. The
/// last two only happen on cyclic input and are treated like a dangling
/// parent: whatever was resolved so far is kept.
pub fn resolve_one(arena: &ItemArena<'_>, item: &Item) -> Lineage {
    let max_depth = arena.len();
    let mut ancestors: Vec<ItemId> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([item.id.as_str()]);
    let mut parent = item.parent.as_str();

    while !parent.is_empty() {
        let Some(parent_item) = arena.get(parent) else {
            tracing::debug!(
                "item {} references unknown parent {}, lineage truncated",
                item.id,
                parent
            );
            break;
        };

        if ancestors.len() >= max_depth || !seen.insert(parent_item.id.as_str()) {
            tracing::debug!(
                "parent chain of item {} loops back at {}, lineage truncated",
                item.id,
                parent
            );
            break;
        }

        ancestors.push(parent_item.id.clone());
        parent = parent_item.parent.as_str();
    }

    ancestors.reverse();
    ancestors.push(item.id.clone());
    ancestors
}
