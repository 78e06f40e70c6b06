//! Error types for chunking operations.

/// Errors that can occur while chunking a source stream.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    /// The fixed-width chunk index space is exhausted.
    ///
    /// Fatal to the in-progress chunking operation; the naming scheme
    /// admits no further chunks for this source item.
    #[error("chunk index space exhausted for {source_id}: max index is {max}")]
    IndexExhausted {
        /// Source content ID whose index space ran out.
        source_id: String,
        /// Largest representable index.
        max: u32,
    },

    /// The maximum chunk size must be greater than zero.
    #[error("max chunk size must be greater than zero")]
    InvalidChunkSize,

    /// An I/O error occurred reading the source stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest was requested before the source stream was drained.
    #[error("source stream not fully consumed, manifest is incomplete")]
    SourceNotDrained,
}
