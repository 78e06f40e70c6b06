//! Monotonic chunk ID sequencing.

use seam_types::naming::{self, MAX_CHUNK_INDEX};

use crate::error::ChunkError;

/// Issues chunk storage keys for one source content item, in order.
///
/// Requesting the next ID advances the internal counter by exactly one;
/// the call is not idempotent. Exceeding [`MAX_CHUNK_INDEX`] is fatal for
/// the chunking operation — the fixed-width naming scheme neither wraps
/// nor truncates.
#[derive(Debug)]
pub struct ChunkIdSequence {
    source_id: String,
    next_index: u32,
}

impl ChunkIdSequence {
    /// Start a fresh sequence for `source_id`, beginning at index 0.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            next_index: 0,
        }
    }

    /// The source content ID this sequence derives chunk keys from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Number of IDs issued so far.
    pub fn issued(&self) -> u32 {
        self.next_index
    }

    /// Issue the next chunk storage key.
    pub fn next_id(&mut self) -> Result<String, ChunkError> {
        if self.next_index > MAX_CHUNK_INDEX {
            return Err(ChunkError::IndexExhausted {
                source_id: self.source_id.clone(),
                max: MAX_CHUNK_INDEX,
            });
        }
        let id = naming::chunk_content_id(&self.source_id, self.next_index);
        self.next_index += 1;
        Ok(id)
    }
}
