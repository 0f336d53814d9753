//! # Order Engine
//!
//! Creation and status transitions of [`Order`]s, plus the waiter's
//! [`OrderDraft`] pad that feeds creation.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. DRAFT (waiter pad, not persisted)                                  │
//! │     └── OrderDraft::add_product / remove_one                           │
//! │                                                                         │
//! │  2. CREATE                                                             │
//! │     └── Order::create() → Order { status: Pending }                    │
//! │         items split once into food_items / drink_items                 │
//! │                                                                         │
//! │  3. KITCHEN                                                            │
//! │     └── advance_to(InKitchen) → advance_to(Ready)                      │
//! │                                                                         │
//! │  4. CASHIER                                                            │
//! │     └── advance_to(Paid)  (terminal, kept as history)                  │
//! │                                                                         │
//! │  No cancel, no void, no way back.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{items_total, Order, OrderItem, OrderStatus, Product};
use crate::validation::{validate_order_items, validate_quantity, validate_table_number};
use crate::UNASSIGNED_WAITER;

// =============================================================================
// Item Partition
// =============================================================================

/// Splits items into the food bucket (entrada, plato, postre) and the drink
/// bucket (bebida), keeping their relative order.
pub fn split_items(items: &[OrderItem]) -> (Vec<OrderItem>, Vec<OrderItem>) {
    items
        .iter()
        .cloned()
        .partition(|item| item.category.is_food())
}

/// Generates a new order id.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Creation
// =============================================================================

impl Order {
    /// Creates a pending order for `table_number`.
    ///
    /// ## What This Does
    /// 1. Rejects an empty item list (`CoreError::EmptyOrder`)
    /// 2. Validates the table number and every line
    /// 3. Splits items into food/drink buckets, once
    /// 4. Freezes `total` = Σ price × quantity (checked, overflow is a
    ///    validation error)
    /// 5. Falls back to [`UNASSIGNED_WAITER`] when no waiter is given
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use restobar_core::{Category, Money, Order, OrderItem, OrderStatus};
    ///
    /// let items = vec![OrderItem {
    ///     product_id: "1".into(),
    ///     product_name: "Tequeños".into(),
    ///     quantity: 2,
    ///     price: Money::from_cents(2850),
    ///     category: Category::Entrada,
    /// }];
    /// let order = Order::create("o-1".into(), 5, items, None, Utc::now()).unwrap();
    ///
    /// assert_eq!(order.status(), OrderStatus::Pending);
    /// assert_eq!(order.total().cents(), 5700);
    /// assert!(order.drink_items().is_empty());
    /// ```
    pub fn create(
        id: String,
        table_number: u32,
        items: Vec<OrderItem>,
        waiter_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> CoreResult<Order> {
        if items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        validate_table_number(table_number)?;
        let total = validate_order_items(&items)?;

        let (food_items, drink_items) = split_items(&items);

        let waiter_name = waiter_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED_WAITER)
            .to_string();

        Ok(Order {
            id,
            table_number,
            items,
            status: OrderStatus::Pending,
            timestamp: now,
            total,
            food_items,
            drink_items,
            waiter_name,
        })
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// Result of asking an order to move to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum StatusChange {
    /// The order moved forward.
    Applied { from: OrderStatus, to: OrderStatus },
    /// The request would not move the order forward; nothing changed.
    Ignored {
        current: OrderStatus,
        requested: OrderStatus,
    },
}

impl StatusChange {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, StatusChange::Applied { .. })
    }
}

impl Order {
    /// Moves the order to `target` when that is further along the lifecycle.
    ///
    /// Requests for the current status or an earlier one are ignored, so no
    /// caller can walk an order backwards. Skipping ahead (e.g. pending →
    /// paid) is accepted.
    pub fn advance_to(&mut self, target: OrderStatus) -> StatusChange {
        if target.rank() <= self.status.rank() {
            return StatusChange::Ignored {
                current: self.status,
                requested: target,
            };
        }

        let from = self.status;
        self.status = target;
        StatusChange::Applied { from, to: target }
    }

    /// Moves the order one step forward, if it is not already paid.
    pub fn advance(&mut self) -> StatusChange {
        match self.status.next() {
            Some(next) => self.advance_to(next),
            None => StatusChange::Ignored {
                current: self.status,
                requested: self.status,
            },
        }
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The waiter's pad while building an order for a table.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding again bumps the quantity)
/// - Every quantity is ≥ 1 (removing the last unit drops the line)
/// - Lines are snapshots of the product at the moment they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        OrderDraft::default()
    }

    /// Adds one unit of `product`.
    ///
    /// ## Errors
    /// - `ProductUnavailable` if the kitchen marked it out
    /// - `Validation` if the line would exceed [`crate::MAX_ITEM_QUANTITY`]
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        self.add_quantity(product, 1)
    }

    /// Adds `quantity` units of `product`.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) -> CoreResult<()> {
        if !product.available {
            return Err(CoreError::ProductUnavailable {
                product_id: product.id.clone(),
                name: product.name.clone(),
            });
        }

        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity.saturating_add(quantity);
            validate_quantity(new_qty)?;
            item.quantity = new_qty;
            return Ok(());
        }

        self.items.push(OrderItem::snapshot(product, quantity));
        Ok(())
    }

    /// Removes one unit of `product_id`; drops the line when it reaches zero.
    /// Returns `false` when the product was not on the pad.
    pub fn remove_one(&mut self, product_id: &str) -> bool {
        let Some(index) = self.items.iter().position(|i| i.product_id == product_id) else {
            return false;
        };

        if self.items[index].quantity > 1 {
            self.items[index].quantity -= 1;
        } else {
            self.items.remove(index);
        }
        true
    }

    /// Units of `product_id` currently on the pad (0 when absent).
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Running total shown under the pad.
    pub fn total(&self) -> Money {
        items_total(&self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Hands the lines over for [`Order::create`].
    pub fn into_items(self) -> Vec<OrderItem> {
        self.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::Category;
    use crate::MAX_ITEM_QUANTITY;

    fn product(id: &str, name: &str, cents: i64, category: Category) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_cents(cents),
            category,
            available: true,
        }
    }

    fn mixed_items() -> Vec<OrderItem> {
        vec![
            OrderItem::snapshot(&product("1", "Tequeños", 2850, Category::Entrada), 2),
            OrderItem::snapshot(&product("7", "Cerveza Polar", 1200, Category::Bebida), 3),
            OrderItem::snapshot(&product("10", "Tres Leches", 1850, Category::Postre), 1),
        ]
    }

    fn pending_order() -> Order {
        Order::create("o-1".to_string(), 5, mixed_items(), Some("Juan Pérez"), Utc::now())
            .unwrap()
    }

    #[test]
    fn test_create_partitions_items() {
        let order = pending_order();

        assert_eq!(order.food_items().len(), 2);
        assert_eq!(order.drink_items().len(), 1);
        assert!(order.food_items().iter().all(|i| i.category.is_food()));
        assert!(order.drink_items().iter().all(|i| i.category.is_drink()));

        // foodItems ⊎ drinkItems == items
        let mut rejoined: Vec<_> = order
            .food_items()
            .iter()
            .chain(order.drink_items())
            .map(|i| i.product_id.clone())
            .collect();
        let mut all_ids: Vec<_> = order.items().iter().map(|i| i.product_id.clone()).collect();
        rejoined.sort();
        all_ids.sort();
        assert_eq!(rejoined, all_ids);
    }

    #[test]
    fn test_create_freezes_total() {
        let order = pending_order();
        // 2×28.50 + 3×12.00 + 1×18.50
        assert_eq!(order.total().cents(), 5700 + 3600 + 1850);
        assert_eq!(order.food_total().cents(), 7550);
        assert_eq!(order.drink_total().cents(), 3600);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.waiter_name(), "Juan Pérez");
    }

    #[test]
    fn test_create_rejects_empty_items() {
        let result = Order::create("o".to_string(), 3, vec![], None, Utc::now());
        assert!(matches!(result, Err(CoreError::EmptyOrder)));
    }

    #[test]
    fn test_create_rejects_table_zero() {
        let result = Order::create("o".to_string(), 0, mixed_items(), None, Utc::now());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_overflowing_price_without_panicking() {
        let items = vec![OrderItem {
            product_id: "x".to_string(),
            product_name: "Botella".to_string(),
            quantity: 2,
            price: Money::from_cents(9_000_000_000_000_000_000),
            category: Category::Bebida,
        }];

        let result = Order::create("o".to_string(), 1, items, None, Utc::now());
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_create_defaults_waiter() {
        let order = Order::create("o".to_string(), 1, mixed_items(), None, Utc::now()).unwrap();
        assert_eq!(order.waiter_name(), UNASSIGNED_WAITER);

        let order =
            Order::create("o".to_string(), 1, mixed_items(), Some("  "), Utc::now()).unwrap();
        assert_eq!(order.waiter_name(), UNASSIGNED_WAITER);
    }

    #[test]
    fn test_advance_walks_forward() {
        let mut order = pending_order();

        assert_eq!(
            order.advance(),
            StatusChange::Applied {
                from: OrderStatus::Pending,
                to: OrderStatus::InKitchen
            }
        );
        assert!(order.advance_to(OrderStatus::Ready).is_applied());
        assert!(order.advance_to(OrderStatus::Paid).is_applied());
        assert_eq!(order.status(), OrderStatus::Paid);
        assert!(!order.advance().is_applied());
    }

    #[test]
    fn test_status_never_decreases() {
        let all = [
            OrderStatus::Pending,
            OrderStatus::InKitchen,
            OrderStatus::Ready,
            OrderStatus::Paid,
        ];

        for start in all {
            for target in all {
                let mut order = pending_order();
                order.advance_to(start);
                let before = order.status().rank();
                order.advance_to(target);
                assert!(order.status().rank() >= before);
            }
        }
    }

    #[test]
    fn test_backward_request_is_ignored() {
        let mut order = pending_order();
        order.advance_to(OrderStatus::Ready);

        let change = order.advance_to(OrderStatus::Pending);
        assert_eq!(
            change,
            StatusChange::Ignored {
                current: OrderStatus::Ready,
                requested: OrderStatus::Pending
            }
        );
        assert_eq!(order.status(), OrderStatus::Ready);
    }

    #[test]
    fn test_draft_merges_and_removes() {
        let tequenos = product("1", "Tequeños", 2850, Category::Entrada);
        let coca = product("8", "Coca Cola", 850, Category::Bebida);
        let mut draft = OrderDraft::new();

        draft.add_product(&tequenos).unwrap();
        draft.add_product(&tequenos).unwrap();
        draft.add_product(&coca).unwrap();

        assert_eq!(draft.items().len(), 2);
        assert_eq!(draft.quantity_of("1"), 2);
        assert_eq!(draft.total().cents(), 2 * 2850 + 850);

        assert!(draft.remove_one("1"));
        assert_eq!(draft.quantity_of("1"), 1);
        assert!(draft.remove_one("1"));
        assert_eq!(draft.quantity_of("1"), 0);
        assert_eq!(draft.items().len(), 1);
        assert!(!draft.remove_one("missing"));
    }

    #[test]
    fn test_draft_rejects_unavailable_product() {
        let mut asado = product("5", "Asado Negro", 6000, Category::Plato);
        asado.available = false;

        let mut draft = OrderDraft::new();
        let result = draft.add_product(&asado);
        assert!(matches!(result, Err(CoreError::ProductUnavailable { .. })));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_draft_quantity_cap() {
        let jugo = product("9", "Jugo Natural", 1300, Category::Bebida);
        let mut draft = OrderDraft::new();
        draft.add_quantity(&jugo, MAX_ITEM_QUANTITY).unwrap();
        assert!(draft.add_product(&jugo).is_err());
        assert_eq!(draft.quantity_of("9"), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_draft_into_order() {
        let mut draft = OrderDraft::new();
        draft
            .add_product(&product("4", "Pabellón Criollo", 5000, Category::Plato))
            .unwrap();

        let order = Order::create(
            generate_order_id(),
            12,
            draft.into_items(),
            None,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(order.total().cents(), 5000);
        assert!(!order.has_drinks());
    }
}
