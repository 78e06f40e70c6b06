//! In-memory chunk manifest model.
//!
//! A [`ChunksManifest`] describes one source content item: its original
//! identity, size, and whole-object checksum, plus the ordered list of
//! chunks that reconstitute it. The manifest is mutable only while the
//! write path appends entries; once the source stream has been fully
//! consumed and the header checksum set, it is treated as read-only.

/// Header of a chunk manifest: the identity of the original source item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestHeader {
    /// ID of the source content item. Never empty.
    pub source_content_id: String,
    /// Declared mimetype of the source content.
    pub source_mimetype: String,
    /// Total size of the source content in bytes.
    pub source_byte_size: u64,
    /// Lowercase hex checksum of the whole source stream.
    /// Empty until the source has been fully read.
    pub source_checksum: String,
}

/// One chunk of a source item, as recorded in its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Storage key of this chunk, derived from the source ID and index.
    pub chunk_id: String,
    /// Lowercase hex checksum of this chunk's bytes.
    pub chunk_checksum: String,
    /// Position of this chunk within the source item, starting at 0.
    pub index: u32,
    /// Size of this chunk in bytes (not the whole object).
    pub byte_size: u64,
}

/// Manifest for a chunked source item: one header plus ordered entries.
///
/// Entry order is insertion order and is significant; serialization must
/// preserve it. Indices are expected to be exactly `0..entries.len()` and
/// entry byte sizes to sum to the header byte size once finalized — the
/// chunking engine maintains both by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunksManifest {
    /// Source item identity and whole-object checksum.
    pub header: ManifestHeader,
    /// Chunk descriptors in index order.
    pub entries: Vec<ChunkEntry>,
}

impl ChunksManifest {
    /// Create an empty manifest for the given source item.
    pub fn new(source_content_id: impl Into<String>, source_mimetype: impl Into<String>) -> Self {
        Self {
            header: ManifestHeader {
                source_content_id: source_content_id.into(),
                source_mimetype: source_mimetype.into(),
                source_byte_size: 0,
                source_checksum: String::new(),
            },
            entries: Vec::new(),
        }
    }

    /// Append one chunk entry.
    ///
    /// The caller is responsible for index correctness; this method does
    /// not re-derive or validate the index.
    pub fn add_entry(&mut self, entry: ChunkEntry) {
        self.entries.push(entry);
    }

    /// Record the whole-source checksum, once the source stream has been
    /// fully consumed.
    pub fn set_source_checksum(&mut self, checksum: impl Into<String>) {
        self.header.source_checksum = checksum.into();
    }

    /// Number of chunks in this manifest.
    pub fn chunk_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all entry byte sizes.
    ///
    /// Equals `header.source_byte_size` for a finalized manifest.
    pub fn total_chunk_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.byte_size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(index: u32, byte_size: u64) -> ChunkEntry {
        ChunkEntry {
            chunk_id: format!("item.dura-chunk-{index:04}"),
            chunk_checksum: format!("checksum-{index}"),
            index,
            byte_size,
        }
    }

    #[test]
    fn test_new_manifest_is_empty() {
        let manifest = ChunksManifest::new("item", "text/plain");
        assert_eq!(manifest.header.source_content_id, "item");
        assert_eq!(manifest.header.source_mimetype, "text/plain");
        assert_eq!(manifest.header.source_byte_size, 0);
        assert!(manifest.header.source_checksum.is_empty());
        assert_eq!(manifest.chunk_count(), 0);
    }

    #[test]
    fn test_add_entry_preserves_order() {
        let mut manifest = ChunksManifest::new("item", "");
        manifest.add_entry(sample_entry(0, 100));
        manifest.add_entry(sample_entry(1, 100));
        manifest.add_entry(sample_entry(2, 50));

        let indices: Vec<u32> = manifest.entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_total_chunk_bytes() {
        let mut manifest = ChunksManifest::new("item", "");
        manifest.add_entry(sample_entry(0, 100));
        manifest.add_entry(sample_entry(1, 42));
        assert_eq!(manifest.total_chunk_bytes(), 142);
    }

    #[test]
    fn test_set_source_checksum() {
        let mut manifest = ChunksManifest::new("item", "");
        manifest.set_source_checksum("5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            manifest.header.source_checksum,
            "5d41402abc4b2a76b9719d911017c592"
        );
    }
}
