use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::item::Item;

/// Failure to obtain the item snapshot
///
/// Carries the step that failed so the caller can tell an authentication
/// problem from a listing problem. Nothing here is retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No usable credentials were available
    #[error("not authenticated: {0}")]
    Unauthenticated(String),
    /// The request never produced a response
    #[error("transport error during {step}: {message}")]
    Transport { step: &'static str, message: String },
    /// The remote answered with a non-success status
    #[error("{step} returned HTTP {status}: {body}")]
    Status {
        step: &'static str,
        status: u16,
        body: String,
    },
    /// The response body could not be decoded
    #[error("failed to decode {step} response: {message}")]
    Decode { step: &'static str, message: String },
}

/// Supplier of the full, flat item list
///
/// One call returns the whole store. The projection treats the result as an
/// atomic snapshot: it never pages through it or diffs it against a previous
/// one.
#[async_trait]
pub trait ItemSource: Send + Sync + Debug {
    async fn fetch_all_items(&self) -> Result<Vec<Item>, FetchError>;
}

#[async_trait]
impl<T: ItemSource + ?Sized> ItemSource for Arc<T> {
    async fn fetch_all_items(&self) -> Result<Vec<Item>, FetchError> {
        (**self).fetch_all_items().await
    }
}
