//! In-memory content storage backend.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::RwLock;

use bytes::Bytes;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::{ContentStream, DataSource};

/// In-memory content store backed by a `RwLock<HashMap>`.
///
/// Useful for tests and for callers that assemble content before
/// forwarding it to a remote backend.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<(String, String), Bytes>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an item, returning its bytes if it was present.
    pub fn remove(&self, space_id: &str, content_id: &str) -> Option<Bytes> {
        let mut items = self.items.write().expect("lock poisoned");
        items.remove(&(space_id.to_string(), content_id.to_string()))
    }

    /// Whether the named item is present.
    pub fn contains(&self, space_id: &str, content_id: &str) -> bool {
        let items = self.items.read().expect("lock poisoned");
        items.contains_key(&(space_id.to_string(), content_id.to_string()))
    }

    /// Number of items stored, across all spaces.
    pub fn len(&self) -> usize {
        self.items.read().expect("lock poisoned").len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl DataSource for MemoryStore {
    async fn get_content(
        &self,
        space_id: &str,
        content_id: &str,
    ) -> Result<ContentStream, StoreError> {
        let items = self.items.read().expect("lock poisoned");
        match items.get(&(space_id.to_string(), content_id.to_string())) {
            Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
            None => Err(StoreError::NotFound {
                space_id: space_id.to_string(),
                content_id: content_id.to_string(),
            }),
        }
    }

    async fn put_content(
        &self,
        space_id: &str,
        content_id: &str,
        data: Bytes,
    ) -> Result<(), StoreError> {
        debug!(space_id, content_id, size = data.len(), "storing content in memory");
        let mut items = self.items.write().expect("lock poisoned");
        items.insert((space_id.to_string(), content_id.to_string()), data);
        Ok(())
    }
}
