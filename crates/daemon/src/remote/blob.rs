use async_trait::async_trait;

use common::item::Item;
use common::source::ItemSource;

use super::client::BlobDetails;
use super::error::RemoteError;

/// Read access to the blobs behind an item source's documents
#[async_trait]
pub trait BlobReader: ItemSource {
    /// Size and MD5 of an item's blob, without downloading it
    async fn head_blob(&self, item: &Item) -> Result<BlobDetails, RemoteError>;

    /// The raw bytes of an item's blob
    async fn download_blob(&self, item: &Item) -> Result<Vec<u8>, RemoteError>;
}
