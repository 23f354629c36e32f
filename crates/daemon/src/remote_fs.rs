//! Remote-storage view over a session
//!
//! Presents the projection the way file-sync tooling expects a remote to
//! look: entries carry paths relative to the configured root, directories
//! that don't exist are "directory not found", single paths resolve to object
//! metadata. The view is read-only.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use common::item::Item;
use common::projection::{DirEntry, EntryKind, ProjectionError};
use common::session::Session;
use common::source::{FetchError, ItemSource};

use crate::remote::{BlobDetails, BlobReader, RemoteError};

#[derive(Debug, thiserror::Error)]
pub enum RemoteFsError {
    #[error("directory not found: {0}")]
    DirNotFound(String),
    #[error("object not found: {0}")]
    ObjectNotFound(String),
    #[error("{0} is a directory")]
    IsDirectory(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Metadata of a single entry as presented to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    /// Path relative to the configured root
    pub remote: String,
    pub name: String,
    pub id: String,
    pub kind: EntryKind,
    pub version: i64,
    pub modified: Option<DateTime<Utc>>,
}

impl ObjectInfo {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

#[derive(Debug)]
pub struct RemoteFs<S> {
    session: Session<S>,
}

impl<S: ItemSource> RemoteFs<S> {
    pub fn new(session: Session<S>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// List a directory relative to the root
    pub async fn list(&self, dir: &str) -> Result<Vec<ObjectInfo>, RemoteFsError> {
        let entries = self.session.list(dir).await.map_err(|e| match e {
            ProjectionError::NotFound(_) => RemoteFsError::DirNotFound(dir.to_string()),
            ProjectionError::Fetch(e) => RemoteFsError::Fetch(e),
        })?;

        Ok(entries.iter().map(|entry| self.entry_info(entry)).collect())
    }

    /// Metadata for a single path relative to the root
    pub async fn stat(&self, path: &str) -> Result<ObjectInfo, RemoteFsError> {
        let item = self.item(path).await?;
        EntryKind::of(&item.kind)
            .map(|kind| self.item_info(item, kind))
            .ok_or_else(|| RemoteFsError::ObjectNotFound(path.to_string()))
    }

    /// Every entry below `dir`, depth first, parents before children
    ///
    /// Directories are expanded by item id, so collections whose canonical
    /// path no query can address (empty display names) are walked too.
    pub async fn walk(&self, dir: &str) -> Result<Vec<ObjectInfo>, RemoteFsError> {
        let mut found = Vec::new();
        let mut expanded = HashSet::new();
        let mut pending: Vec<ObjectInfo> = self.list(dir).await?.into_iter().rev().collect();

        while let Some(entry) = pending.pop() {
            if entry.is_dir() && expanded.insert(entry.id.clone()) {
                let children = self.list_item(&entry).await?;
                pending.extend(children.into_iter().rev());
            }
            found.push(entry);
        }

        Ok(found)
    }

    async fn list_item(&self, entry: &ObjectInfo) -> Result<Vec<ObjectInfo>, RemoteFsError> {
        let entries = self.session.list_item(&entry.id).await.map_err(|e| match e {
            ProjectionError::NotFound(_) => RemoteFsError::DirNotFound(entry.remote.clone()),
            ProjectionError::Fetch(e) => RemoteFsError::Fetch(e),
        })?;

        Ok(entries.iter().map(|child| self.entry_info(child)).collect())
    }

    async fn item(&self, path: &str) -> Result<&Item, RemoteFsError> {
        self.session.resolve_item(path).await.map_err(|e| match e {
            ProjectionError::NotFound(_) => RemoteFsError::ObjectNotFound(path.to_string()),
            ProjectionError::Fetch(e) => RemoteFsError::Fetch(e),
        })
    }

    fn entry_info(&self, entry: &DirEntry<'_>) -> ObjectInfo {
        self.item_info(entry.item, entry.kind)
    }

    fn item_info(&self, item: &Item, kind: EntryKind) -> ObjectInfo {
        let remote = self
            .session
            .root_relative_path(item)
            .unwrap_or_else(|| item.name.clone());

        ObjectInfo {
            remote,
            name: item.name.clone(),
            id: item.id.clone(),
            kind,
            version: item.version,
            modified: item.modified(),
        }
    }
}

impl<S: BlobReader> RemoteFs<S> {
    /// Metadata plus blob size and checksum for a document
    pub async fn details(&self, path: &str) -> Result<(ObjectInfo, BlobDetails), RemoteFsError> {
        let (info, item) = self.document(path).await?;
        let details = self.session.source().head_blob(item).await?;
        Ok((info, details))
    }

    /// Raw contents of a document
    pub async fn read(&self, path: &str) -> Result<Vec<u8>, RemoteFsError> {
        let (info, item) = self.document(path).await?;
        let bytes = self.session.source().download_blob(item).await?;
        tracing::debug!("read {} bytes from {}", bytes.len(), info.remote);
        Ok(bytes)
    }

    async fn document(&self, path: &str) -> Result<(ObjectInfo, &Item), RemoteFsError> {
        let info = self.stat(path).await?;
        if info.is_dir() {
            return Err(RemoteFsError::IsDirectory(path.to_string()));
        }

        let item = self.item(path).await?;
        Ok((info, item))
    }
}
