//! Core capability trait for named byte-stream storage.

use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::error::StoreError;

/// A readable byte stream handed out by a [`DataSource`].
pub type ContentStream = Box<dyn AsyncRead + Send + Unpin>;

/// Minimal storage capability: get or put a named byte stream.
///
/// Items are addressed by `(space_id, content_id)`, both opaque string
/// keys. All implementations must be `Send + Sync`; a single
/// implementation may serve concurrent chunking or stitching operations,
/// each of which holds its own streams.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the named item as a readable byte stream.
    ///
    /// Fails with [`StoreError::NotFound`] when the item does not exist,
    /// distinguishable from transport errors.
    async fn get_content(
        &self,
        space_id: &str,
        content_id: &str,
    ) -> Result<ContentStream, StoreError>;

    /// Store the named item, replacing any previous value.
    async fn put_content(
        &self,
        space_id: &str,
        content_id: &str,
        data: Bytes,
    ) -> Result<(), StoreError>;
}
