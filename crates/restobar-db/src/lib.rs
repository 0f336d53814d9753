//! # restobar-db: Storage and Service Layer for Restobar
//!
//! Keeps the products, tables and orders collections and exposes the
//! [`Restaurant`] service the screens call.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Restobar Data Flow                               │
//! │                                                                         │
//! │  Screen action (place order, advance, pay)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  restobar-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌────────────────┐    │   │
//! │  │   │  Restaurant  │──►│ Repositories  │──►│CollectionStore │    │   │
//! │  │   │ (service.rs) │   │ product/table │   │ Database       │    │   │
//! │  │   │              │   │ /order        │   │ MemoryStore    │    │   │
//! │  │   └──────┬───────┘   └───────────────┘   │ DetachedStore  │    │   │
//! │  │          │                                └────────────────┘    │   │
//! │  │          ▼                                                      │   │
//! │  │   restobar-core (pure rules and views)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file, table `collections`                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The storage seam and its in-process implementations
//! - [`pool`] - SQLite pool and the SQLite store
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Typed access per collection
//! - [`service`] - The `Restaurant` service
//! - [`config`] - Runtime configuration
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use restobar_db::{Database, DbConfig, Restaurant, RestobarConfig};
//!
//! let config = RestobarConfig::from_env();
//! let db = Database::new(DbConfig::new(&config.database_path)).await?;
//! let restaurant = Restaurant::new(db, config);
//!
//! let order = restaurant.place_order(5, &[("1", 2)], Some("Ana")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::RestobarConfig;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{Restaurant, SeedReport};
pub use store::{Collection, CollectionStore, DetachedStore, MemoryStore};

// Repository re-exports for convenience
pub use repository::{OrderRepository, ProductRepository, TableRepository, UpdateOutcome};
