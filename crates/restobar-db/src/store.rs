//! # Collection Store
//!
//! The storage seam. Restobar keeps three named collections, each a JSON
//! array written and read as a whole.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CollectionStore implementations                     │
//! │                                                                         │
//! │  Database (pool.rs)  SQLite `collections` table, one row per key       │
//! │  MemoryStore         HashMap behind a tokio RwLock (tests, demos)      │
//! │  DetachedStore       No storage at all: reads are empty, writes are    │
//! │                      dropped. Repositories fall back to defaults.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no locking across collections: one logical writer at a time is
//! assumed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// The named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Tables,
    Orders,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Products, Collection::Tables, Collection::Orders];

    /// Storage key of the collection.
    pub const fn key(&self) -> &'static str {
        match self {
            Collection::Products => "restobar_products",
            Collection::Tables => "restobar_tables",
            Collection::Orders => "restobar_orders",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Get/set of whole collections as raw JSON text.
///
/// `Ok(None)` means the collection was never written.
#[allow(async_fn_in_trait)]
pub trait CollectionStore: Send + Sync {
    async fn get_raw(&self, collection: Collection) -> DbResult<Option<String>>;

    async fn set_raw(&self, collection: Collection, payload: String) -> DbResult<()>;
}

/// Reads and decodes a collection.
pub async fn load<S, T>(store: &S, collection: Collection) -> DbResult<Option<Vec<T>>>
where
    S: CollectionStore,
    T: DeserializeOwned,
{
    match store.get_raw(collection).await? {
        Some(payload) => serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| DbError::payload(collection.key(), e)),
        None => Ok(None),
    }
}

/// Encodes and writes a whole collection.
pub async fn save<S, T>(store: &S, collection: Collection, items: &[T]) -> DbResult<()>
where
    S: CollectionStore,
    T: Serialize,
{
    let payload =
        serde_json::to_string(items).map_err(|e| DbError::payload(collection.key(), e))?;
    store.set_raw(collection, payload).await
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl CollectionStore for MemoryStore {
    async fn get_raw(&self, collection: Collection) -> DbResult<Option<String>> {
        Ok(self.collections.read().await.get(&collection).cloned())
    }

    async fn set_raw(&self, collection: Collection, payload: String) -> DbResult<()> {
        self.collections.write().await.insert(collection, payload);
        Ok(())
    }
}

// =============================================================================
// Detached Store
// =============================================================================

/// Stand-in used when no storage is reachable.
///
/// Every read reports an empty collection and every write is discarded, so
/// the service keeps answering with the default menu and floor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStore;

impl CollectionStore for DetachedStore {
    async fn get_raw(&self, collection: Collection) -> DbResult<Option<String>> {
        debug!(collection = %collection, "Detached store read");
        Ok(None)
    }

    async fn set_raw(&self, collection: Collection, _payload: String) -> DbResult<()> {
        debug!(collection = %collection, "Detached store dropped write");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
