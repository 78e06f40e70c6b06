//! Digesting stream decorator.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use digest::Digest;
use md5::Md5;
use tokio::io::{AsyncRead, ReadBuf};

/// Checksum value reported when digesting was disabled at construction.
pub const CHECKSUM_DISABLED: &str = "checksum-disabled";

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

/// One-shot MD5 of a byte slice, as lowercase hex.
pub fn md5_hex(data: &[u8]) -> String {
    to_hex(Md5::digest(data))
}

/// Stream decorator that feeds every byte read through it into a running
/// digest, MD5 by default.
///
/// The checksum is only meaningful once the wrapped stream has been fully
/// drained; calling [`checksum`](Self::checksum) earlier returns the digest
/// of whatever has been read so far. Constructed with
/// [`disabled`](Self::disabled), no digest is computed at all and
/// `checksum()` returns the fixed [`CHECKSUM_DISABLED`] sentinel.
pub struct DigestReader<R, D: Digest = Md5> {
    inner: R,
    digest: Option<D>,
    bytes_read: u64,
}

impl<R> DigestReader<R> {
    /// Wrap `inner`, computing an MD5 checksum as it is read.
    pub fn new(inner: R) -> Self {
        Self::with_digest(inner, Md5::new())
    }

    /// Wrap `inner` without computing any checksum.
    pub fn disabled(inner: R) -> Self {
        Self {
            inner,
            digest: None,
            bytes_read: 0,
        }
    }
}

impl<R, D: Digest> DigestReader<R, D> {
    /// Wrap `inner` with an explicit digest algorithm.
    pub fn with_digest(inner: R, digest: D) -> Self {
        Self {
            inner,
            digest: Some(digest),
            bytes_read: 0,
        }
    }

    /// Number of bytes read through this wrapper so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// The accumulated checksum as lowercase hex, or [`CHECKSUM_DISABLED`]
    /// when digesting was disabled.
    ///
    /// Callers must drain the wrapped stream first; before end-of-data this
    /// is an in-progress value.
    pub fn checksum(&self) -> String
    where
        D: Clone,
    {
        match &self.digest {
            Some(digest) => to_hex(digest.clone().finalize()),
            None => CHECKSUM_DISABLED.to_string(),
        }
    }

    /// Unwrap, returning the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: AsyncRead + Unpin, D: Digest + Unpin> AsyncRead for DigestReader<R, D> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let me = self.as_mut().get_mut();
        match Pin::new(&mut me.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                let new = &buf.filled()[before..];
                if let Some(digest) = me.digest.as_mut() {
                    digest.update(new);
                }
                me.bytes_read += new.len() as u64;
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    // Reference value: md5("hello").
    const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";

    #[test]
    fn test_md5_hex_reference_value() {
        assert_eq!(md5_hex(b"hello"), HELLO_MD5);
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(to_hex([0x0a, 0xff, 0x00]), "0aff00");
    }

    #[tokio::test]
    async fn test_checksum_after_drain() {
        let mut reader = DigestReader::new(&b"hello"[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();

        assert_eq!(out, b"hello");
        assert_eq!(reader.checksum(), HELLO_MD5);
        assert_eq!(reader.bytes_read(), 5);
    }

    #[tokio::test]
    async fn test_checksum_matches_one_shot_digest() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        let mut reader = DigestReader::new(data.as_slice());
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();

        assert_eq!(reader.checksum(), md5_hex(&data));
    }

    #[tokio::test]
    async fn test_small_reads_accumulate() {
        let mut reader = DigestReader::new(&b"hello"[..]);
        let mut byte = [0u8; 1];
        for _ in 0..5 {
            assert_eq!(reader.read(&mut byte).await.unwrap(), 1);
        }
        assert_eq!(reader.read(&mut byte).await.unwrap(), 0);
        assert_eq!(reader.checksum(), HELLO_MD5);
    }

    #[tokio::test]
    async fn test_disabled_returns_sentinel() {
        let mut reader = DigestReader::disabled(&b"hello"[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();

        assert_eq!(out, b"hello");
        assert_eq!(reader.checksum(), CHECKSUM_DISABLED);
        assert_eq!(reader.bytes_read(), 5);
    }

    #[tokio::test]
    async fn test_empty_stream_checksum() {
        let mut reader = DigestReader::new(&b""[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();

        // md5 of the empty input.
        assert_eq!(reader.checksum(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(reader.bytes_read(), 0);
    }
}
