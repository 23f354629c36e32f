//! In-memory item source
//!
//! Serves a fixed snapshot (or a fixed failure) and counts how often it was
//! asked. Useful wherever a real remote isn't: tests, offline inspection of a
//! saved item dump.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::item::Item;

use super::provider::{FetchError, ItemSource};

#[derive(Debug, Clone)]
pub struct MemoryItemSource {
    response: Result<Vec<Item>, FetchError>,
    delay: Option<Duration>,
    fetches: Arc<AtomicUsize>,
}

impl MemoryItemSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            response: Ok(items),
            delay: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose every fetch fails with `error`
    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Err(error),
            delay: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hold every fetch for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches served so far, shared between clones
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSource for MemoryItemSource {
    async fn fetch_all_items(&self) -> Result<Vec<Item>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}
