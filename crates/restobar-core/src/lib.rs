//! # restobar-core: Order Engine for Restobar
//!
//! Everything the waiters, the kitchen and the cashiers agree on, as pure
//! functions over plain data. No storage, no clock: callers pass the orders
//! they loaded and the current time.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Restobar Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (out of scope)                       │   │
//! │  │    Tables ──► Order pad ──► Kitchen board ──► Cashier          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           restobar-db (Restaurant service + storage)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ restobar-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐           │   │
//! │  │   │  order  │  │  floor  │  │ kitchen │  │ cashier │           │   │
//! │  │   │ create  │  │occupancy│  │ priority│  │  views  │           │   │
//! │  │   │ advance │  │ summary │  │  queue  │  │ totals  │           │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘           │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────┐          │   │
//! │  │   │ payment │  │ catalog │  │  money  │  │validation│          │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────┘          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, Table, ...)
//! - [`money`] - Integer céntimos
//! - [`order`] - Order creation, status transitions, the order pad
//! - [`floor`] - Table occupancy derived from orders
//! - [`kitchen`] - Kitchen board with priorities
//! - [`cashier`] - Cashier views and sales totals
//! - [`payment`] - Discount, tip and cash tender
//! - [`catalog`] - Default menu, admin input, category grouping
//! - [`validation`] - Input rules
//! - [`error`] - Domain errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use restobar_core::catalog::{default_products, default_tables};
//! use restobar_core::floor::{floor_overview, Occupancy};
//! use restobar_core::{Order, OrderDraft, OrderStatus};
//!
//! let menu = default_products();
//! let mut pad = OrderDraft::new();
//! pad.add_product(&menu[0]).unwrap(); // Tequeños
//! pad.add_product(&menu[0]).unwrap();
//!
//! let mut order = Order::create("o-1".into(), 5, pad.into_items(), None, Utc::now()).unwrap();
//! assert_eq!(order.total().cents(), 5700);
//!
//! let tables = default_tables(20);
//! let floor = floor_overview(&tables, std::slice::from_ref(&order));
//! assert_eq!(floor[4].occupancy, Occupancy::Occupied);
//!
//! order.advance_to(OrderStatus::Paid);
//! let floor = floor_overview(&tables, std::slice::from_ref(&order));
//! assert_eq!(floor[4].occupancy, Occupancy::Available);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cashier;
pub mod catalog;
pub mod error;
pub mod floor;
pub mod kitchen;
pub mod money;
pub mod order;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cashier::{CashierView, SalesTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use floor::{Occupancy, TableSummary};
pub use kitchen::{KitchenFilter, KitchenQueue, KitchenSort, KitchenTicket, Priority};
pub use money::Money;
pub use order::{OrderDraft, StatusChange};
pub use payment::{PaymentQuote, PaymentRequest, Settlement};
pub use rust_decimal::Decimal;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Waiter name stored when the order was taken without one.
pub const UNASSIGNED_WAITER: &str = "unassigned";

/// Maximum quantity of a single line on the order pad.
///
/// Catches a mistyped 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest menu price, S/ 1,000,000.00. Keeps every order total far from
/// `i64` overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Maximum product name length accepted from the menu admin.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// 100%.
pub const MAX_DISCOUNT_BPS: u32 = 10_000;

/// 50%.
pub const MAX_TIP_BPS: u32 = 5_000;

/// Tables on a fresh floor.
pub const DEFAULT_TABLE_COUNT: u32 = 20;

/// A kitchen ticket waiting longer than this is medium priority.
pub const KITCHEN_MEDIUM_AFTER_MINUTES: i64 = 15;

/// A kitchen ticket waiting longer than this is high priority.
pub const KITCHEN_HIGH_AFTER_MINUTES: i64 = 30;
