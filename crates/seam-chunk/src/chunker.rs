//! Single-pass chunking engine.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use seam_io::{DigestReader, md5_hex};
use seam_types::{ChunkEntry, ChunksManifest};

use crate::error::ChunkError;
use crate::sequence::ChunkIdSequence;

/// One chunk produced by the [`Chunker`], ready to be stored under
/// `content_id` before the next chunk is even read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Storage key for this chunk.
    pub content_id: String,
    /// Position within the source item, starting at 0.
    pub index: u32,
    /// Size of this chunk in bytes.
    pub byte_size: u64,
    /// Lowercase hex MD5 of this chunk's bytes.
    pub checksum: String,
    /// The chunk's bytes.
    pub data: Bytes,
}

/// Splits a source byte stream into bounded chunks in a single pass.
///
/// Each [`next_chunk`](Self::next_chunk) call reads at most
/// `max_chunk_size` bytes, so memory is bounded to one chunk's worth of
/// buffering regardless of source size. The whole-source checksum is
/// accumulated through a [`DigestReader`] as chunks are read; once the
/// source reports end-of-data, the manifest header is finalized with the
/// total byte size and checksum.
///
/// The last chunk may be shorter than `max_chunk_size`. A zero-byte
/// source still yields exactly one (empty) chunk, so every stored item
/// has at least one chunk and one manifest.
///
/// A read error from the source aborts the operation; chunks already
/// handed to the caller are not rolled back here — cleanup against the
/// store is the caller's responsibility.
pub struct Chunker<R> {
    reader: DigestReader<R>,
    max_chunk_size: usize,
    sequence: ChunkIdSequence,
    manifest: ChunksManifest,
    finished: bool,
}

impl<R: AsyncRead + Unpin> Chunker<R> {
    /// Create a chunker over `reader` for the given source item.
    ///
    /// `max_chunk_size` must be greater than zero.
    pub fn new(
        reader: R,
        source_content_id: impl Into<String>,
        source_mimetype: impl Into<String>,
        max_chunk_size: usize,
    ) -> Result<Self, ChunkError> {
        if max_chunk_size == 0 {
            return Err(ChunkError::InvalidChunkSize);
        }
        let source_content_id = source_content_id.into();
        Ok(Self {
            reader: DigestReader::new(reader),
            max_chunk_size,
            sequence: ChunkIdSequence::new(source_content_id.clone()),
            manifest: ChunksManifest::new(source_content_id, source_mimetype),
            finished: false,
        })
    }

    /// Read and return the next chunk, or `None` once the source is drained.
    ///
    /// Appends the matching entry to the manifest before returning the
    /// chunk, so the in-progress manifest always describes every chunk
    /// already handed out.
    pub async fn next_chunk(&mut self) -> Result<Option<Chunk>, ChunkError> {
        if self.finished {
            return Ok(None);
        }

        let mut buf = vec![0u8; self.max_chunk_size];
        let mut filled = 0;
        let mut eof = false;

        // Read exactly max_chunk_size bytes, or until end-of-data.
        while filled < self.max_chunk_size {
            let n = self.reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                eof = true;
                break;
            }
            filled += n;
        }

        if eof && filled == 0 && !self.manifest.entries.is_empty() {
            self.finalize();
            return Ok(None);
        }
        // A zero-byte source falls through and yields one empty chunk.

        buf.truncate(filled);
        let content_id = self.sequence.next_id()?;
        let index = self.manifest.chunk_count() as u32;
        let byte_size = filled as u64;
        let checksum = md5_hex(&buf);

        self.manifest.add_entry(ChunkEntry {
            chunk_id: content_id.clone(),
            chunk_checksum: checksum.clone(),
            index,
            byte_size,
        });

        if eof {
            self.finalize();
        }

        debug!(content_id = %content_id, index, byte_size, "produced chunk");

        Ok(Some(Chunk {
            content_id,
            index,
            byte_size,
            checksum,
            data: Bytes::from(buf),
        }))
    }

    fn finalize(&mut self) {
        self.manifest.header.source_byte_size = self.reader.bytes_read();
        let checksum = self.reader.checksum();
        self.manifest.set_source_checksum(checksum);
        self.finished = true;
        debug!(
            source_content_id = %self.manifest.header.source_content_id,
            chunks = self.manifest.chunk_count(),
            total_bytes = self.manifest.header.source_byte_size,
            "source drained, manifest finalized"
        );
    }

    /// The manifest as populated so far. Header totals are only set once
    /// the source has been drained.
    pub fn manifest(&self) -> &ChunksManifest {
        &self.manifest
    }

    /// Whether the source stream has been fully consumed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the chunker, returning the finalized manifest.
    ///
    /// Fails with [`ChunkError::SourceNotDrained`] if the source stream
    /// has not reported end-of-data yet.
    pub fn into_manifest(self) -> Result<ChunksManifest, ChunkError> {
        if !self.finished {
            return Err(ChunkError::SourceNotDrained);
        }
        Ok(self.manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seam_io::CHECKSUM_DISABLED;

    /// Generate deterministic, non-repeating test data.
    fn test_data(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut state: u32 = 0xDEAD_BEEF;
        for _ in 0..size {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            data.push((state >> 16) as u8);
        }
        data
    }

    async fn drain<R: AsyncRead + Unpin>(mut chunker: Chunker<R>) -> (Vec<Chunk>, ChunksManifest) {
        let mut chunks = Vec::new();
        while let Some(chunk) = chunker.next_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        let manifest = chunker.into_manifest().unwrap();
        (chunks, manifest)
    }

    #[tokio::test]
    async fn test_chunk_conservation() {
        // 3.5 chunks worth of data.
        let data = test_data(350);
        let chunker = Chunker::new(data.as_slice(), "item", "application/octet-stream", 100)
            .unwrap();
        let (chunks, manifest) = drain(chunker).await;

        assert_eq!(chunks.len(), 4);
        assert_eq!(manifest.chunk_count(), 4);
        assert_eq!(manifest.total_chunk_bytes(), 350);
        assert_eq!(manifest.header.source_byte_size, 350);

        let sizes: Vec<u64> = chunks.iter().map(|c| c.byte_size).collect();
        assert_eq!(sizes, vec![100, 100, 100, 50]);

        let indices: Vec<u32> = manifest.entries.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_exact_multiple_of_chunk_size() {
        let data = test_data(200);
        let chunker = Chunker::new(data.as_slice(), "item", "", 100).unwrap();
        let (chunks, manifest) = drain(chunker).await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(manifest.total_chunk_bytes(), 200);
    }

    #[tokio::test]
    async fn test_zero_byte_source_yields_one_empty_chunk() {
        let chunker = Chunker::new(&b""[..], "item", "", 100).unwrap();
        let (chunks, manifest) = drain(chunker).await;

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].byte_size, 0);
        assert_eq!(chunks[0].content_id, "item.dura-chunk-0000");
        assert_eq!(manifest.chunk_count(), 1);
        assert_eq!(manifest.header.source_byte_size, 0);
        // md5 of the empty input.
        assert_eq!(
            manifest.header.source_checksum,
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[tokio::test]
    async fn test_chunk_names_follow_naming_scheme() {
        let data = test_data(250);
        let chunker = Chunker::new(data.as_slice(), "dir/report.pdf", "", 100).unwrap();
        let (chunks, _) = drain(chunker).await;

        let names: Vec<&str> = chunks.iter().map(|c| c.content_id.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "dir/report.pdf.dura-chunk-0000",
                "dir/report.pdf.dura-chunk-0001",
                "dir/report.pdf.dura-chunk-0002",
            ]
        );
    }

    #[tokio::test]
    async fn test_checksums_match_reference_digest() {
        let data = test_data(350);
        let chunker = Chunker::new(data.as_slice(), "item", "", 100).unwrap();
        let (chunks, manifest) = drain(chunker).await;

        assert_eq!(manifest.header.source_checksum, md5_hex(&data));
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * 100;
            let end = (start + 100).min(data.len());
            assert_eq!(chunk.checksum, md5_hex(&data[start..end]));
            assert_eq!(&chunk.data[..], &data[start..end]);
        }
        for (chunk, entry) in chunks.iter().zip(manifest.entries.iter()) {
            assert_eq!(chunk.checksum, entry.chunk_checksum);
            assert_eq!(chunk.content_id, entry.chunk_id);
        }
    }

    #[tokio::test]
    async fn test_into_manifest_before_drain_fails() {
        let data = test_data(350);
        let mut chunker = Chunker::new(data.as_slice(), "item", "", 100).unwrap();
        chunker.next_chunk().await.unwrap();

        assert!(!chunker.is_finished());
        let err = chunker.into_manifest().unwrap_err();
        assert!(matches!(err, ChunkError::SourceNotDrained));
    }

    #[tokio::test]
    async fn test_manifest_available_after_last_chunk() {
        // When the source ends mid-chunk, the final next_chunk call both
        // yields the short chunk and finalizes the header.
        let data = test_data(150);
        let mut chunker = Chunker::new(data.as_slice(), "item", "", 100).unwrap();

        chunker.next_chunk().await.unwrap().unwrap();
        assert!(!chunker.is_finished());

        let last = chunker.next_chunk().await.unwrap().unwrap();
        assert_eq!(last.byte_size, 50);
        assert!(chunker.is_finished());
        assert_eq!(chunker.manifest().header.source_byte_size, 150);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_rejected() {
        let err = Chunker::new(&b"data"[..], "item", "", 0).map(|_| ()).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidChunkSize));
    }

    #[tokio::test]
    async fn test_index_space_exhaustion_is_fatal() {
        // 10_000 one-byte chunks fill the index space; the next byte fails.
        let data = test_data(10_001);
        let mut chunker = Chunker::new(data.as_slice(), "item", "", 1).unwrap();

        for _ in 0..10_000 {
            chunker.next_chunk().await.unwrap().unwrap();
        }
        let err = chunker.next_chunk().await.unwrap_err();
        assert!(matches!(err, ChunkError::IndexExhausted { .. }));
    }

    #[tokio::test]
    async fn test_mimetype_carried_into_header() {
        let chunker = Chunker::new(&b"x"[..], "item", "text/plain", 100).unwrap();
        let (_, manifest) = drain(chunker).await;
        assert_eq!(manifest.header.source_mimetype, "text/plain");
        assert_ne!(manifest.header.source_checksum, CHECKSUM_DISABLED);
    }
}
