//! # Validation Module
//!
//! Input validation for operator-entered data: menu admin forms, the
//! waiter's pad and the cashier's payment form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer                                           │
//! │  └── Disables buttons (empty pad, missing tender)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Parses typed amounts                                              │
//! │  └── Checks ranges (price, quantity, discount, tip, table)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order engine / payment calculator                            │
//! │  └── Business rules (empty order, insufficient tender)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed check never leaves partial state behind: callers validate before
//! touching the store.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{OrderItem, Percent};
use crate::{MAX_DISCOUNT_BPS, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN, MAX_TIP_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ```rust
/// use restobar_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Quesillo ").unwrap(), "Quesillo");
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Amount Parsing
// =============================================================================

/// Parses a typed decimal amount for `field`.
///
/// ## Errors
/// - empty input → `Required`
/// - anything [`Money::parse_decimal`] refuses → `InvalidFormat`
pub fn parse_amount(field: &str, input: &str) -> ValidationResult<Money> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Money::parse_decimal(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a number with at most 2 decimals".to_string(),
    })
}

/// Parses the admin form's price field. Must be a number above zero.
///
/// ```rust
/// use restobar_core::validation::parse_price;
///
/// assert_eq!(parse_price("18.50").unwrap().cents(), 1850);
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("gratis").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let price = parse_amount("price", input)?;
    validate_price(price)?;
    Ok(price)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Menu prices must be positive and at most `MAX_PRICE_CENTS`.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price (céntimos)".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - At least 1
/// - At most `MAX_ITEM_QUANTITY` (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Table numbers start at 1.
pub fn validate_table_number(number: u32) -> ValidationResult<()> {
    if number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "table number".to_string(),
        });
    }

    Ok(())
}

/// Discount must be within 0–100%.
pub fn validate_discount(discount: Percent) -> ValidationResult<()> {
    validate_percent("discount", discount, MAX_DISCOUNT_BPS)
}

/// Tip must be within 0–50%.
pub fn validate_tip(tip: Percent) -> ValidationResult<()> {
    validate_percent("tip", tip, MAX_TIP_BPS)
}

fn validate_percent(field: &str, value: Percent, max_bps: u32) -> ValidationResult<()> {
    if value.bps() > max_bps {
        return Err(ValidationError::OutOfRange {
            field: format!("{field} (%)"),
            min: 0,
            max: (max_bps / 100) as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Checks every line of a submitted order and returns its total.
///
/// Quantity must be in range and price within `0..=MAX_PRICE_CENTS`. The
/// total is summed with checked arithmetic. Emptiness is an order rule and
/// is checked by the engine.
pub fn validate_order_items(items: &[OrderItem]) -> ValidationResult<Money> {
    let mut total = Money::zero();

    for item in items {
        validate_quantity(item.quantity)?;

        if item.price.is_negative() || item.price.cents() > MAX_PRICE_CENTS {
            return Err(ValidationError::OutOfRange {
                field: format!("price of {}", item.product_name),
                min: 0,
                max: MAX_PRICE_CENTS,
            });
        }

        total = item
            .price
            .checked_multiply_quantity(item.quantity)
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "order total".to_string(),
                min: 0,
                max: i64::MAX,
            })?;
    }

    Ok(total)
}

// =============================================================================
// Unit Tests
// =============================================================================
