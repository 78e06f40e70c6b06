//! Streaming primitives for Seam: single-pass stream decorators that
//! compute a checksum or carry a known byte length while data flows
//! through, without materializing it.
//!
//! - [`DigestReader`] — feeds every byte read into a running digest
//!   (MD5 by default), exposing the accumulated checksum as lowercase hex.
//! - [`SizedReader`] — an in-memory reader whose encoded byte length is
//!   fixed at construction, for transports that must declare a content
//!   length before streaming.

mod digest_reader;
mod sized;

pub use digest_reader::{CHECKSUM_DISABLED, DigestReader, md5_hex, to_hex};
pub use sized::SizedReader;
