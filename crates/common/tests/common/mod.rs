//! Shared fixtures for the projection integration tests

#![allow(dead_code)]

use ::common::item::Item;

/// A small library shaped like a real one:
///
/// ```text
/// Books/
///   Fiction/
///     dune
///   manual
/// Notes/
///   meeting
/// quick sketch
/// ```
pub fn library() -> Vec<Item> {
    vec![
        Item::collection("books", "", "Books"),
        Item::collection("fiction", "books", "Fiction"),
        Item::document("dune", "fiction", "dune"),
        Item::document("manual", "books", "manual"),
        Item::collection("notes", "", "Notes"),
        Item::document("meeting", "notes", "meeting"),
        Item::document("sketch", "", "quick sketch"),
    ]
}

/// Install a test subscriber so `RUST_LOG` works under `cargo test`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn names(entries: &[::common::DirEntry<'_>]) -> Vec<String> {
    entries.iter().map(|entry| entry.name.to_string()).collect()
}
