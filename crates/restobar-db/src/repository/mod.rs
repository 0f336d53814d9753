//! # Repository Module
//!
//! One repository per collection, each a thin typed view over a
//! [`CollectionStore`](crate::store::CollectionStore).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Restaurant service                                                    │
//! │       │  restaurant.orders().update_status("o-1", Ready)               │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │       │  load whole collection → change one entry → save whole         │
//! │       ▼                                                                 │
//! │  CollectionStore (SQLite / memory / detached)                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Updates keyed by id never fail on a miss: they answer with
//! [`UpdateOutcome::NotFound`] and leave the collection as it was.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Menu catalog
//! - [`TableRepository`] - Floor layout
//! - [`OrderRepository`] - Orders, active and historical

use serde::{Deserialize, Serialize};

pub mod order;
pub mod product;
pub mod table;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use table::TableRepository;

/// Result of an update or delete keyed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateOutcome {
    /// The entry changed and the collection was saved.
    Applied,
    /// The entry exists but the change would not move it forward.
    Ignored,
    /// No entry with that id.
    NotFound,
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}
