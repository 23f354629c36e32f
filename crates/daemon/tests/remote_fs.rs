//! Integration tests for the remote-storage view
//!
//! These run against an in-memory item source, so no network is involved.

use std::collections::HashMap;

use async_trait::async_trait;

use common::item::{Item, ItemKind};
use common::projection::EntryKind;
use common::session::Session;
use common::source::{FetchError, ItemSource, MemoryItemSource};

use rmfs_daemon::{BlobDetails, BlobReader, RemoteError, RemoteFs, RemoteFsError};

fn library() -> Vec<Item> {
    let mut dune = Item::document("dune", "fiction", "dune");
    dune.version = 4;
    dune.modified_client = "2022-11-05T10:20:30.000Z".to_string();

    vec![
        Item::collection("books", "", "Books"),
        Item::collection("fiction", "books", "Fiction"),
        dune,
        Item::document("manual", "books", "manual"),
        Item::document("sketch", "", "quick sketch"),
        Item::new("grid", "", "grid", ItemKind::Other("TemplateType".to_string())),
    ]
}

/// Item source with blobs held in memory
#[derive(Debug)]
struct Library {
    items: MemoryItemSource,
    blobs: HashMap<String, Vec<u8>>,
}

impl Library {
    fn new() -> Self {
        let blobs = HashMap::from([
            ("dune".to_string(), b"%PDF-dune".to_vec()),
            ("manual".to_string(), b"%PDF-manual".to_vec()),
        ]);
        Self {
            items: MemoryItemSource::new(library()),
            blobs,
        }
    }

    fn blob(&self, item: &Item) -> Result<&Vec<u8>, RemoteError> {
        self.blobs
            .get(&item.id)
            .ok_or_else(|| RemoteError::NoBlob(item.id.clone()))
    }
}

#[async_trait]
impl ItemSource for Library {
    async fn fetch_all_items(&self) -> Result<Vec<Item>, FetchError> {
        self.items.fetch_all_items().await
    }
}

#[async_trait]
impl BlobReader for Library {
    async fn head_blob(&self, item: &Item) -> Result<BlobDetails, RemoteError> {
        let blob = self.blob(item)?;
        Ok(BlobDetails {
            size: Some(blob.len() as u64),
            md5: None,
        })
    }

    async fn download_blob(&self, item: &Item) -> Result<Vec<u8>, RemoteError> {
        self.blob(item).cloned()
    }
}

fn open(root: &str) -> (RemoteFs<MemoryItemSource>, MemoryItemSource) {
    let source = MemoryItemSource::new(library());
    let session = Session::new(source.clone()).with_root(root);
    (RemoteFs::new(session), source)
}

fn remotes(items: &[rmfs_daemon::ObjectInfo]) -> Vec<&str> {
    items.iter().map(|item| item.remote.as_str()).collect()
}

#[tokio::test]
async fn test_list_root() {
    let (fs, _) = open("");
    let items = fs.list("").await.unwrap();

    assert_eq!(remotes(&items), vec!["Books", "quick sketch", "Trash"]);
    assert!(items[0].is_dir());
    assert!(!items[1].is_dir());
    assert!(items[2].is_dir());
}

#[tokio::test]
async fn test_list_rooted_paths_are_root_relative() {
    let (fs, _) = open("Books");

    let items = fs.list("/").await.unwrap();
    assert_eq!(remotes(&items), vec!["Fiction", "manual"]);

    let items = fs.list("Fiction").await.unwrap();
    assert_eq!(remotes(&items), vec!["Fiction/dune"]);
}

#[tokio::test]
async fn test_list_missing_directory() {
    let (fs, _) = open("");

    match fs.list("Books/Poetry").await {
        Err(RemoteFsError::DirNotFound(dir)) => assert_eq!(dir, "Books/Poetry"),
        other => panic!("expected DirNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_document_returns_itself() {
    let (fs, _) = open("");
    let items = fs.list("Books/manual").await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "manual");
    assert_eq!(items[0].remote, "Books/manual");
}

#[tokio::test]
async fn test_stat_document() {
    let (fs, _) = open("");
    let info = fs.stat("Books/Fiction/dune").await.unwrap();

    assert_eq!(info.id, "dune");
    assert_eq!(info.kind, EntryKind::File);
    assert_eq!(info.version, 4);
    assert_eq!(
        info.modified.unwrap().to_rfc3339(),
        "2022-11-05T10:20:30+00:00"
    );
}

#[tokio::test]
async fn test_stat_root_item_uses_its_name() {
    let (fs, _) = open("Books/Fiction");
    let info = fs.stat("").await.unwrap();

    assert_eq!(info.remote, "Fiction");
    assert!(info.is_dir());
}

#[tokio::test]
async fn test_stat_missing_or_unlisted_kind() {
    let (fs, _) = open("");

    assert!(matches!(
        fs.stat("nothing/here").await,
        Err(RemoteFsError::ObjectNotFound(_))
    ));
    assert!(matches!(
        fs.stat("grid").await,
        Err(RemoteFsError::ObjectNotFound(_))
    ));
}

#[tokio::test]
async fn test_walk_is_preorder() {
    let (fs, source) = open("");
    let items = fs.walk("").await.unwrap();

    assert_eq!(
        remotes(&items),
        vec![
            "Books",
            "Books/Fiction",
            "Books/Fiction/dune",
            "Books/manual",
            "quick sketch",
            "Trash",
        ]
    );
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn test_walk_reaches_below_empty_names() {
    let source = MemoryItemSource::new(vec![
        Item::collection("a", "", "A"),
        Item::collection("blank", "a", ""),
        Item::document("d", "blank", "deep"),
    ]);
    let fs = RemoteFs::new(Session::new(source).with_trash(false));

    let items = fs.walk("").await.unwrap();
    assert_eq!(remotes(&items), vec!["A", "A/", "A//deep"]);
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "blank", "d"]);
}

#[tokio::test]
async fn test_names_with_surrounding_spaces() {
    let source = MemoryItemSource::new(vec![
        Item::collection("notes", "", "Notes "),
        Item::document("meeting", "notes", "meeting"),
        Item::document("sketch", "", " sketch"),
    ]);
    let fs = RemoteFs::new(Session::new(source).with_trash(false));

    let items = fs.list("Notes ").await.unwrap();
    assert_eq!(remotes(&items), vec!["Notes /meeting"]);

    let info = fs.stat(" sketch").await.unwrap();
    assert_eq!(info.id, "sketch");
    assert!(matches!(
        fs.stat("sketch").await,
        Err(RemoteFsError::ObjectNotFound(_))
    ));

    let items = fs.walk("").await.unwrap();
    assert_eq!(
        remotes(&items),
        vec!["Notes ", "Notes /meeting", " sketch"]
    );
}

#[tokio::test]
async fn test_read_document() {
    let fs = RemoteFs::new(Session::new(Library::new()));

    let bytes = fs.read("Books/Fiction/dune").await.unwrap();
    assert_eq!(bytes, b"%PDF-dune");

    let (info, details) = fs.details("Books/manual").await.unwrap();
    assert_eq!(info.id, "manual");
    assert_eq!(details.size, Some(b"%PDF-manual".len() as u64));
}

#[tokio::test]
async fn test_read_rejects_directories_and_missing_paths() {
    let fs = RemoteFs::new(Session::new(Library::new()));

    assert!(matches!(
        fs.read("Books").await,
        Err(RemoteFsError::IsDirectory(path)) if path == "Books"
    ));
    assert!(matches!(
        fs.read("Books/missing").await,
        Err(RemoteFsError::ObjectNotFound(_))
    ));
}

#[tokio::test]
async fn test_read_surfaces_transport_errors() {
    let fs = RemoteFs::new(Session::new(Library::new()));

    // "quick sketch" has no blob stored
    assert!(matches!(
        fs.read("quick sketch").await,
        Err(RemoteFsError::Remote(RemoteError::NoBlob(id))) if id == "sketch"
    ));
}

#[tokio::test]
async fn test_fetch_failure_surfaces() {
    let source = MemoryItemSource::failing(FetchError::Unauthenticated("expired".to_string()));
    let fs = RemoteFs::new(Session::new(source));

    assert!(matches!(
        fs.list("").await,
        Err(RemoteFsError::Fetch(FetchError::Unauthenticated(_)))
    ));
    assert!(matches!(
        fs.stat("Books").await,
        Err(RemoteFsError::Fetch(_))
    ));
}
