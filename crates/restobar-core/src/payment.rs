//! # Payment Calculator
//!
//! Turns an order plus the cashier's inputs into a quote, and checks cash
//! tender. Pure: marking the order paid is left to the caller.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal        = Σ food lines + Σ drink lines   (recomputed)         │
//! │  discount_amount = subtotal × discount%           (exact)              │
//! │  after_discount  = subtotal − discount_amount                          │
//! │  tip_amount      = after_discount × tip%          (exact)              │
//! │  final_total     = after_discount + tip_amount                         │
//! │                                                                         │
//! │  cash:           received ≥ final_total, change = received − final     │
//! │  mobile wallet:  no tender, no change                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Subtotals are céntimos ([`Money`]). From the discount on, amounts are
//! exact [`Decimal`] soles: a 15% tip on S/ 51.30 is 7.695, and cash of
//! 19.09 does not cover a bill of 19.095.
//!
//! ## Example
//! ```rust
//! use chrono::Utc;
//! use restobar_core::payment::{settle, PaymentRequest};
//! use restobar_core::{Category, Money, Order, OrderItem, Percent};
//!
//! let items = vec![OrderItem {
//!     product_id: "1".into(),
//!     product_name: "Tequeños".into(),
//!     quantity: 2,
//!     price: Money::from_cents(2850),
//!     category: Category::Entrada,
//! }];
//! let order = Order::create("o-1".into(), 5, items, None, Utc::now()).unwrap();
//!
//! let request = PaymentRequest::cash(
//!     Percent::from_whole(10),
//!     Percent::from_whole(15),
//!     Money::from_cents(6000),
//! );
//! let settlement = settle(&order, &request).unwrap();
//!
//! assert_eq!(settlement.quote.final_total.to_string(), "58.995");
//! assert_eq!(settlement.change.unwrap().to_string(), "1.005");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Order, OrderStatus, PaymentMethod, Percent};
use crate::validation::{validate_discount, validate_tip};

/// What the cashier typed in the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// 0–100%.
    pub discount: Percent,
    /// 0–50%.
    pub tip: Percent,
    pub method: PaymentMethod,
    /// Cash handed over. Required for cash, ignored otherwise.
    pub received: Option<Money>,
}

impl PaymentRequest {
    pub fn cash(discount: Percent, tip: Percent, received: Money) -> Self {
        PaymentRequest {
            discount,
            tip,
            method: PaymentMethod::Cash,
            received: Some(received),
        }
    }

    pub fn mobile_wallet(discount: Percent, tip: Percent) -> Self {
        PaymentRequest {
            discount,
            tip,
            method: PaymentMethod::MobileWallet,
            received: None,
        }
    }
}

/// Breakdown shown on the payment form.
///
/// Decimal fields are soles and serialise as strings (`"58.995"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    pub food_total: Money,
    pub drink_total: Money,
    pub subtotal: Money,
    #[ts(type = "string")]
    pub discount_amount: Decimal,
    #[ts(type = "string")]
    pub after_discount: Decimal,
    #[ts(type = "string")]
    pub tip_amount: Decimal,
    #[ts(type = "string")]
    pub final_total: Decimal,
}

impl PaymentQuote {
    /// Change owed for `received`, or `None` when it does not cover the
    /// exact final total.
    pub fn change_for(&self, received: Money) -> Option<Decimal> {
        let received = received.to_decimal();
        if received < self.final_total {
            None
        } else {
            Some(trim_scale(received - self.final_total))
        }
    }
}

/// Drops trailing zeros past the céntimo: `58.9950000000` → `58.995`,
/// `5.700000` → `5.70`. The value is unchanged.
fn trim_scale(amount: Decimal) -> Decimal {
    let mut amount = amount.normalize();
    if amount.scale() < 2 {
        amount.rescale(2);
    }
    amount
}

/// Outcome of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub order_id: String,
    pub table_number: u32,
    pub method: PaymentMethod,
    pub quote: PaymentQuote,
    pub received: Option<Money>,
    #[ts(type = "string | null")]
    pub change: Option<Decimal>,
}

/// Computes the quote for `order`.
///
/// The subtotal comes from the item buckets, not from the order's stored
/// total.
///
/// ## Errors
/// `Validation` when the discount is above 100% or the tip above 50%.
pub fn quote(order: &Order, discount: Percent, tip: Percent) -> CoreResult<PaymentQuote> {
    validate_discount(discount)?;
    validate_tip(tip)?;

    let food_total = order.food_total();
    let drink_total = order.drink_total();
    let subtotal = food_total + drink_total;

    let discount_amount = subtotal.to_decimal() * discount.as_fraction();
    let after_discount = subtotal.to_decimal() - discount_amount;
    let tip_amount = after_discount * tip.as_fraction();
    let final_total = after_discount + tip_amount;

    Ok(PaymentQuote {
        food_total,
        drink_total,
        subtotal,
        discount_amount: trim_scale(discount_amount),
        after_discount: trim_scale(after_discount),
        tip_amount: trim_scale(tip_amount),
        final_total: trim_scale(final_total),
    })
}

/// Validates a payment for `order` and returns the settlement to record.
///
/// ## Errors
/// - `InvalidOrderStatus` if the order is already paid
/// - `Validation` for out-of-range percentages or missing cash amount
/// - `InsufficientTender` if cash received < final total
///
/// Nothing is mutated: on `Ok` the caller marks the order paid.
pub fn settle(order: &Order, request: &PaymentRequest) -> CoreResult<Settlement> {
    if order.status() == OrderStatus::Paid {
        return Err(CoreError::InvalidOrderStatus {
            order_id: order.id().to_string(),
            current_status: order.status().to_string(),
        });
    }

    let quote = quote(order, request.discount, request.tip)?;

    let (received, change) = match request.method {
        PaymentMethod::Cash => {
            let received = request.received.ok_or_else(|| ValidationError::Required {
                field: "received amount".to_string(),
            })?;
            let change = quote
                .change_for(received)
                .ok_or(CoreError::InsufficientTender {
                    required: quote.final_total,
                    received: received.to_decimal(),
                })?;
            (Some(received), Some(change))
        }
        PaymentMethod::MobileWallet => (None, None),
    };

    Ok(Settlement {
        order_id: order.id().to_string(),
        table_number: order.table_number(),
        method: request.method,
        quote,
        received,
        change,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
