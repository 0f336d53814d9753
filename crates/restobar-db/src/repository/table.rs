//! # Table Repository
//!
//! The floor layout. Only table numbers are stored; occupancy is derived
//! from orders on every read.

use tracing::debug;

use crate::error::DbResult;
use crate::store::{load, save, Collection, CollectionStore};
use restobar_core::catalog::default_tables;
use restobar_core::Table;

#[derive(Debug)]
pub struct TableRepository<'a, S> {
    store: &'a S,
    /// Size of the floor served while nothing is stored.
    default_count: u32,
}

impl<'a, S: CollectionStore> TableRepository<'a, S> {
    pub fn new(store: &'a S, default_count: u32) -> Self {
        TableRepository {
            store,
            default_count,
        }
    }

    /// Every table, in stored order.
    pub async fn list(&self) -> DbResult<Vec<Table>> {
        match load(self.store, Collection::Tables).await? {
            Some(tables) => Ok(tables),
            None => {
                debug!(count = self.default_count, "No stored floor, serving defaults");
                Ok(default_tables(self.default_count))
            }
        }
    }

    /// Replaces the whole floor.
    pub async fn save_all(&self, tables: &[Table]) -> DbResult<()> {
        debug!(count = tables.len(), "Saving tables");
        save(self.store, Collection::Tables, tables).await
    }
}
