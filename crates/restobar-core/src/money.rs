//! # Money Module
//!
//! Provides the `Money` type for monetary values in céntimos.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing menu prices as floats:                                         │
//! │    28.5 * 2 + 8.5 * 3 + 0.1 = 82.6 (maybe, maybe 82.60000000000001)     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer céntimos                                         │
//! │    2850 * 2 + 850 * 3 + 10 = 8260, always                               │
//! │                                                                         │
//! │  Percentages (discount, tip) leave the céntimo grid, so payment        │
//! │  quotes switch to exact decimals via Money::to_decimal.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use restobar_core::money::Money;
//!
//! let tequenos = Money::from_cents(2850); // S/ 28.50
//! let line = tequenos.multiply_quantity(2);
//! assert_eq!(line.cents(), 5700);
//! assert_eq!(line.to_string(), "S/ 57.00");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Currency prefix used by [`Money`]'s `Display` implementation.
pub const CURRENCY_SYMBOL: &str = "S/";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (céntimos).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► OrderItem.price (snapshot) ──► OrderItem::line_total
///                                                        │
///            Order.total ◄───────────────────────────────┤
///                                                        ▼
///                       PaymentQuote { subtotal, discount, tip, final_total }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from céntimos.
    ///
    /// ```rust
    /// use restobar_core::money::Money;
    ///
    /// let price = Money::from_cents(1850); // S/ 18.50
    /// assert_eq!(price.cents(), 1850);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from soles and céntimos.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in céntimos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Callers work on validated lines; see [`Money::checked_multiply_quantity`]
    /// for untrusted input.
    ///
    /// ```rust
    /// use restobar_core::money::Money;
    ///
    /// let cerveza = Money::from_cents(1200);
    /// assert_eq!(cerveza.multiply_quantity(3).cents(), 3600);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Unit price × quantity, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// The amount in soles as an exact decimal (`5700` → `57.00`).
    ///
    /// ```rust
    /// use restobar_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2850).to_decimal().to_string(), "28.50");
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Parses an operator-typed decimal amount such as `"60"`, `"60.5"` or
    /// `"60.50"`. Signs, exponents and more than two decimals are refused.
    ///
    /// ```rust
    /// use restobar_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("28.5"), Some(Money::from_cents(2850)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let input = input.trim();
        let (major, minor) = input.split_once('.').unwrap_or((input, ""));

        if major.is_empty() && minor.is_empty() {
            return None;
        }
        if minor.len() > 2
            || !major.chars().all(|c| c.is_ascii_digit())
            || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let major: i64 = if major.is_empty() { 0 } else { major.parse().ok()? };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().ok()? * 10,
            _ => minor.parse().ok()?,
        };

        major.checked_mul(100)?.checked_add(minor).map(Money)
    }

    /// Formats with a custom currency symbol, e.g. `"Bs"` → `Bs 57.00`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{} {}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the receipt prints it: `S/ 57.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_SYMBOL))
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validation::parse_amount("amount", s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
