//! Error types for content storage operations.

/// Errors that can occur fetching or storing named byte streams.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested item does not exist in the given space.
    ///
    /// Distinct from transport or I/O failure so callers can tell a
    /// missing chunk from a broken store.
    #[error("content not found: space={space_id}, content={content_id}")]
    NotFound {
        /// Space (container) the item was looked up in.
        space_id: String,
        /// Item key that was requested.
        content_id: String,
    },

    /// An I/O or transport error occurred.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
