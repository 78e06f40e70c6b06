//! Named byte-stream storage for Seam.
//!
//! This crate defines the [`DataSource`] capability the chunking and
//! stitching pipelines depend on — get or put a named byte stream within
//! a space — along with two concrete backends:
//!
//! - [`MemoryStore`] — in-memory storage backed by a `RwLock<HashMap>`.
//! - [`FileStore`] — one file per item under `{base_dir}/{space_id}/…`.
//!
//! Remote backends (object stores, archive services) implement the same
//! trait outside this crate; nothing here assumes more than the
//! get/put contract.

mod error;
mod file_store;
mod memory_store;
mod traits;

pub use error::StoreError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::{ContentStream, DataSource};
