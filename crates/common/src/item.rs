//! Items as the remote document store reports them
//!
//! The store has no notion of paths. Every item only knows its own id and the
//! id of the collection that contains it; an empty parent means the item sits
//! at the store root.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the remote store
pub type ItemId = String;

/// Id of the synthetic trash collection
pub const TRASH_ID: &str = "trash";

/// Display name of the synthetic trash collection
pub const TRASH_NAME: &str = "Trash";

/// Layout of the leading part of `ModifiedClient`
const MODIFIED_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// What an item is, as far as the hierarchy is concerned
///
/// The wire spells these `DocumentType` and `CollectionType`; the bare
/// `Document` and `Collection` spellings are accepted as well. Anything else
/// is kept verbatim in `Other` and never shows up in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Document,
    Collection,
    Other(String),
}

impl ItemKind {
    pub fn is_document(&self) -> bool {
        matches!(self, ItemKind::Document)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ItemKind::Collection)
    }
}

impl From<String> for ItemKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DocumentType" | "Document" => ItemKind::Document,
            "CollectionType" | "Collection" => ItemKind::Collection,
            _ => ItemKind::Other(value),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Document => "DocumentType".to_string(),
            ItemKind::Collection => "CollectionType".to_string(),
            ItemKind::Other(value) => value,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Document => write!(f, "document"),
            ItemKind::Collection => write!(f, "collection"),
            ItemKind::Other(value) => write!(f, "{}", value),
        }
    }
}

/// A single node of the flat remote item list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ID")]
    pub id: ItemId,
    /// Containing collection, empty at the store root
    #[serde(rename = "Parent", default, deserialize_with = "nullable_string")]
    pub parent: ItemId,
    // the API really does spell it this way
    #[serde(rename = "VissibleName")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: ItemKind,
    #[serde(rename = "Version", default)]
    pub version: i64,
    #[serde(rename = "ModifiedClient", default, deserialize_with = "nullable_string")]
    pub modified_client: String,
    #[serde(rename = "BlobURLGet", default, deserialize_with = "nullable_string")]
    pub blob_url: String,
    #[serde(rename = "CurrentPage", default)]
    pub current_page: i64,
    #[serde(rename = "Bookmarked", default)]
    pub bookmarked: bool,
}

impl Item {
    /// Create an item with only the fields the hierarchy cares about
    pub fn new(
        id: impl Into<ItemId>,
        parent: impl Into<ItemId>,
        name: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            name: name.into(),
            kind,
            version: 0,
            modified_client: String::new(),
            blob_url: String::new(),
            current_page: 0,
            bookmarked: false,
        }
    }

    pub fn document(
        id: impl Into<ItemId>,
        parent: impl Into<ItemId>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(id, parent, name, ItemKind::Document)
    }

    pub fn collection(
        id: impl Into<ItemId>,
        parent: impl Into<ItemId>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(id, parent, name, ItemKind::Collection)
    }

    /// The virtual trash collection injected at the store root
    pub fn trash() -> Self {
        Self::collection(TRASH_ID, "", TRASH_NAME)
    }

    /// Whether the item claims to live at the store root
    pub fn is_top_level(&self) -> bool {
        self.parent.is_empty()
    }

    /// Client-side modification time
    ///
    /// Only the first 19 characters (`YYYY-MM-DDTHH:MM:SS`) are significant;
    /// fractional seconds and zone suffixes are ignored and the result is
    /// taken as UTC.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        let stamp = self.modified_client.get(..19)?;
        NaiveDateTime::parse_from_str(stamp, MODIFIED_LAYOUT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_kind_from_wire_strings() {
        assert_eq!(ItemKind::from("DocumentType".to_string()), ItemKind::Document);
        assert_eq!(ItemKind::from("Document".to_string()), ItemKind::Document);
        assert_eq!(
            ItemKind::from("CollectionType".to_string()),
            ItemKind::Collection
        );
        assert_eq!(
            ItemKind::from("TemplateType".to_string()),
            ItemKind::Other("TemplateType".to_string())
        );
    }

    #[test]
    fn test_modified_parses_prefix() {
        let mut item = Item::document("1", "", "notes");
        item.modified_client = "2021-03-04T05:06:07.123456Z".to_string();

        let modified = item.modified().unwrap();
        assert_eq!(modified.year(), 2021);
        assert_eq!(modified.month(), 3);
        assert_eq!(modified.day(), 4);
        assert_eq!(modified.hour(), 5);
        assert_eq!(modified.second(), 7);
    }

    #[test]
    fn test_modified_rejects_short_or_garbage() {
        let mut item = Item::document("1", "", "notes");
        assert!(item.modified().is_none());

        item.modified_client = "2021-03-04".to_string();
        assert!(item.modified().is_none());

        item.modified_client = "not a timestamp at all".to_string();
        assert!(item.modified().is_none());
    }

    #[test]
    fn test_trash_item() {
        let trash = Item::trash();
        assert_eq!(trash.id, TRASH_ID);
        assert_eq!(trash.name, TRASH_NAME);
        assert!(trash.is_top_level());
        assert!(trash.kind.is_collection());
    }
}
