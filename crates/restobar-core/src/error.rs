//! # Error Types
//!
//! Domain-specific error types for restobar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  restobar-core errors (this file)                                      │
//! │  ├── CoreError        - Order / payment rule violations                │
//! │  └── ValidationError  - Operator input failures                        │
//! │                                                                         │
//! │  restobar-db errors (separate crate)                                   │
//! │  └── DbError          - Store failures, wraps CoreError                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → Presentation layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a blocking message for the operator. None of them leaves
//! a partially applied change behind.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Order engine and payment errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but the kitchen marked it unavailable.
    ///
    /// ## When This Occurs
    /// - Waiter taps a dish the kitchen ran out of
    /// - Catalog changed between opening the table and adding the item
    #[error("{name} is not available")]
    ProductUnavailable { product_id: String, name: String },

    /// Order id is not in the orders collection.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Settling an order that is already paid
    #[error("Order {order_id} is {current_status}, cannot perform operation")]
    InvalidOrderStatus {
        order_id: String,
        current_status: String,
    },

    /// Submission with no items.
    #[error("An order needs at least one item")]
    EmptyOrder,

    /// Cash handed over does not cover the final total.
    ///
    /// ## User Workflow
    /// ```text
    /// Final total: S/ 58.995
    ///      │
    ///      ▼
    /// Received: S/ 50.00
    ///      │
    ///      ▼
    /// InsufficientTender { required: 58.995, received: 50.00 }
    ///      │
    ///      ▼
    /// UI shows: "Received amount is insufficient"
    /// ```
    #[error("Received amount is insufficient: required S/ {required}, received S/ {received}")]
    InsufficientTender { required: Decimal, received: Decimal },

    /// Payment was attempted from a cashier view that only shows history.
    #[error("Payments are settled from the general cashier, not the {view} view")]
    PaymentNotAllowed { view: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. non-numeric price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
