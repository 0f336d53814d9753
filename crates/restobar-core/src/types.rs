//! # Domain Types
//!
//! Core domain types used throughout Restobar.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   OrderItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product_id     │◄──│  items          │       │
//! │  │  name           │   │  product_name   │   │  food_items     │       │
//! │  │  price          │   │  price (frozen) │   │  drink_items    │       │
//! │  │  category       │   │  quantity       │   │  status         │       │
//! │  │  available      │   │  category       │   │  table_number   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  OrderStatus    │   │ PaymentMethod   │       │
//! │  │  Entrada        │   │  Pending        │   │  Cash           │       │
//! │  │  Plato          │   │  InKitchen      │   │  MobileWallet   │       │
//! │  │  Bebida (drink) │   │  Ready          │   └─────────────────┘       │
//! │  │  Postre         │   │  Paid           │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisted JSON keeps camelCase field names (`tableNumber`, `foodItems`,
//! `waiterName`, ...). Money fields are integer céntimos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A percentage in basis points (1 bps = 0.01%).
///
/// 1000 bps = 10% discount, 1500 bps = 15% tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from whole percent points (`10` = 10%).
    #[inline]
    pub const fn from_whole(pct: u32) -> Self {
        Percent(pct * 100)
    }

    /// Creates a percentage from a fractional percent (`12.5` = 12.5%).
    /// Negative input saturates to zero.
    pub fn from_percentage(pct: f64) -> Self {
        Percent((pct * 100.0).round().max(0.0) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as an exact fraction: 1500 bps → `0.15`.
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Menu category. Decides which cashier bucket an item lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Starters.
    Entrada,
    /// Main dishes.
    Plato,
    /// Drinks, the only category that goes to the drink bucket.
    Bebida,
    /// Desserts.
    Postre,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 4] = [
        Category::Entrada,
        Category::Plato,
        Category::Bebida,
        Category::Postre,
    ];

    /// Food goes through the kitchen and the food cashier.
    #[inline]
    pub const fn is_food(&self) -> bool {
        !self.is_drink()
    }

    #[inline]
    pub const fn is_drink(&self) -> bool {
        matches!(self, Category::Bebida)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Entrada => "entrada",
            Category::Plato => "plato",
            Category::Bebida => "bebida",
            Category::Postre => "postre",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown to waiters and on the cashier screen.
    pub name: String,

    /// Price in céntimos, always positive.
    pub price: Money,

    pub category: Category,

    /// Cleared by the kitchen when a dish runs out.
    pub available: bool,
}

/// Partial product update used by the menu admin.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub category: Option<Category>,
    pub available: Option<bool>,
}

impl ProductUpdate {
    /// Applies the set fields to `product`.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(available) = self.available {
            product.available = available;
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line in an order.
/// Uses the snapshot pattern: name, price and category are frozen when the
/// waiter adds the product, later menu edits never reach existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of ordering (frozen).
    pub product_name: String,
    pub quantity: u32,
    /// Unit price in céntimos at time of ordering (frozen).
    pub price: Money,
    pub category: Category,
}

impl OrderItem {
    /// Freezes a catalog product into an order line.
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        OrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price: product.price,
            category: product.category,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// Sums the line totals of `items`.
pub fn items_total(items: &[OrderItem]) -> Money {
    items.iter().map(OrderItem::line_total).sum()
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its life. Only ever moves forward.
///
/// ```text
/// Pending ──► InKitchen ──► Ready ──► Paid
///  (waiter)    (kitchen)    (kitchen)  (cashier)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    /// Older records spell this `"preparing"`.
    #[serde(alias = "preparing")]
    InKitchen,
    Ready,
    Paid,
}

impl OrderStatus {
    /// Position in the lifecycle, 0 for `Pending` through 3 for `Paid`.
    #[inline]
    pub const fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::InKitchen => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Paid => 3,
        }
    }

    /// The status the kitchen or cashier would offer next.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::InKitchen),
            OrderStatus::InKitchen => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Paid),
            OrderStatus::Paid => None,
        }
    }

    /// Every status except `Paid` keeps the table occupied.
    #[inline]
    pub const fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Paid)
    }

    /// Pending and in-kitchen orders are the kitchen's work queue.
    #[inline]
    pub const fn is_in_kitchen_queue(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::InKitchen)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InKitchen => "in-kitchen",
            OrderStatus::Ready => "ready",
            OrderStatus::Paid => "paid",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A waiter-submitted order for one table.
///
/// Fields are read through accessors: the item partition and the total are
/// fixed at creation, and the status only moves forward through the
/// transitions in [`crate::order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub(crate) id: String,
    pub(crate) table_number: u32,
    pub(crate) items: Vec<OrderItem>,
    pub(crate) status: OrderStatus,
    #[ts(as = "String")]
    pub(crate) timestamp: DateTime<Utc>,
    /// Σ price × quantity at creation, never recomputed.
    pub(crate) total: Money,
    /// Entradas, platos and postres.
    pub(crate) food_items: Vec<OrderItem>,
    /// Bebidas.
    pub(crate) drink_items: Vec<OrderItem>,
    pub(crate) waiter_name: String,
}

impl Order {
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn table_number(&self) -> u32 {
        self.table_number
    }

    #[inline]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Total stored at creation time.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    #[inline]
    pub fn food_items(&self) -> &[OrderItem] {
        &self.food_items
    }

    #[inline]
    pub fn drink_items(&self) -> &[OrderItem] {
        &self.drink_items
    }

    #[inline]
    pub fn waiter_name(&self) -> &str {
        &self.waiter_name
    }

    #[inline]
    pub fn has_food(&self) -> bool {
        !self.food_items.is_empty()
    }

    #[inline]
    pub fn has_drinks(&self) -> bool {
        !self.drink_items.is_empty()
    }

    /// Value of the food bucket.
    pub fn food_total(&self) -> Money {
        items_total(&self.food_items)
    }

    /// Value of the drink bucket.
    pub fn drink_total(&self) -> Money {
        items_total(&self.drink_items)
    }
}

// =============================================================================
// Table
// =============================================================================

/// A numbered table on the floor.
///
/// Occupancy is not stored here, it is derived from orders by
/// [`crate::floor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub number: u32,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Physical cash, needs a received amount and gives change.
    Cash,
    /// Phone wallet transfer (Yape), no tender or change.
    #[serde(alias = "yape")]
    MobileWallet,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category: Category) -> Product {
        Product {
            id: "1".to_string(),
            name: "Tequeños".to_string(),
            price: Money::from_cents(2850),
            category,
            available: true,
        }
    }

    #[test]
    fn test_percent_constructors() {
        assert_eq!(Percent::from_whole(10).bps(), 1000);
        assert_eq!(Percent::from_percentage(12.5).bps(), 1250);
        assert_eq!(Percent::from_percentage(-3.0).bps(), 0);
        assert!((Percent::from_bps(1500).percentage() - 15.0).abs() < 0.001);
        assert_eq!(Percent::from_whole(15).as_fraction(), Decimal::new(15, 2));
        assert_eq!(Percent::from_bps(1).as_fraction().to_string(), "0.0001");
    }

    #[test]
    fn test_category_buckets() {
        assert!(Category::Entrada.is_food());
        assert!(Category::Plato.is_food());
        assert!(Category::Postre.is_food());
        assert!(Category::Bebida.is_drink());
        assert!(!Category::Bebida.is_food());
    }

    #[test]
    fn test_status_rank_is_forward_order() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            assert!(next.rank() > status.rank());
            status = next;
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Pending,
                OrderStatus::InKitchen,
                OrderStatus::Ready,
                OrderStatus::Paid
            ]
        );
        assert!(!OrderStatus::Paid.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Ready.is_in_kitchen_queue());
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::InKitchen).unwrap();
        assert_eq!(json, "\"in-kitchen\"");
        let parsed: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(parsed, OrderStatus::Ready);
    }

    #[test]
    fn test_legacy_preparing_reads_as_in_kitchen() {
        let parsed: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(parsed, OrderStatus::InKitchen);
        assert!(parsed.is_in_kitchen_queue());

        // Written back under the current name
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"in-kitchen\"");
    }

    #[test]
    fn test_payment_method_accepts_yape() {
        let parsed: PaymentMethod = serde_json::from_str("\"yape\"").unwrap();
        assert_eq!(parsed, PaymentMethod::MobileWallet);
        let json = serde_json::to_string(&PaymentMethod::MobileWallet).unwrap();
        assert_eq!(json, "\"mobile-wallet\"");
    }

    #[test]
    fn test_snapshot_copies_product_fields() {
        let mut p = product(Category::Entrada);
        let item = OrderItem::snapshot(&p, 2);
        p.price = Money::from_cents(9999);
        p.name = "Renamed".to_string();

        assert_eq!(item.product_name, "Tequeños");
        assert_eq!(item.price.cents(), 2850);
        assert_eq!(item.line_total().cents(), 5700);
    }

    #[test]
    fn test_product_update_applies_only_set_fields() {
        let mut p = product(Category::Entrada);
        let update = ProductUpdate {
            price: Some(Money::from_cents(3000)),
            available: Some(false),
            ..ProductUpdate::default()
        };
        update.apply_to(&mut p);

        assert_eq!(p.name, "Tequeños");
        assert_eq!(p.price.cents(), 3000);
        assert!(!p.available);
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(product(Category::Bebida)).unwrap();
        assert_eq!(json["category"], "bebida");
        assert_eq!(json["price"], 2850);
        assert_eq!(json["available"], true);
    }
}
