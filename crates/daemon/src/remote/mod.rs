//! HTTP transport to the remote document store
//!
//! Two steps per session: the device refresh token is exchanged for a user
//! token, and the user token lists every item in one call. Blob metadata and
//! contents are fetched per item on demand.

mod blob;
mod client;
mod error;

pub use blob::BlobReader;
pub use client::{parse_goog_md5, BlobDetails, RemoteClient, RemoteConfig};
pub use error::RemoteError;

/// Public authentication service
pub const DEFAULT_AUTH_URL: &str = "https://my.remarkable.com";

/// Public document storage service
pub const DEFAULT_STORAGE_URL: &str =
    "https://document-storage-production-dot-remarkable-production.appspot.com";
