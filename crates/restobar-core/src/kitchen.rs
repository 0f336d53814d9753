//! # Kitchen Queue
//!
//! The kitchen board: which orders still need cooking, how urgent they are,
//! and in which order to show them.
//!
//! ## Priority by Waiting Time
//! ```text
//!   0 min ─────────── 15 min ─────────── 30 min ──────────►
//!   │      Low         │     Medium        │     High
//!   └── ≤ 15 min ──────┴── ≤ 30 min ───────┴── > 30 min
//! ```
//!
//! Only orders that are pending or in the kitchen AND carry food appear. A
//! drinks-only order never reaches the kitchen.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Order, OrderStatus};
use crate::{KITCHEN_HIGH_AFTER_MINUTES, KITCHEN_MEDIUM_AFTER_MINUTES};

/// Urgency of a kitchen ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Classifies a waiting time. Negative durations (clock skew) count as
    /// no wait at all.
    pub fn for_waiting(waiting: Duration) -> Priority {
        if waiting > Duration::minutes(KITCHEN_HIGH_AFTER_MINUTES) {
            Priority::High
        } else if waiting > Duration::minutes(KITCHEN_MEDIUM_AFTER_MINUTES) {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// Status filter offered on the kitchen board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum KitchenFilter {
    #[default]
    All,
    Pending,
    InKitchen,
}

impl KitchenFilter {
    fn accepts(&self, status: OrderStatus) -> bool {
        match self {
            KitchenFilter::All => true,
            KitchenFilter::Pending => status == OrderStatus::Pending,
            KitchenFilter::InKitchen => status == OrderStatus::InKitchen,
        }
    }
}

/// Sort key of the kitchen board. Both sorts are ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum KitchenSort {
    /// Oldest order first.
    #[default]
    Time,
    /// Lowest table number first.
    Table,
}

/// One card on the kitchen board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenTicket {
    pub order: Order,
    pub priority: Priority,
    /// Whole minutes since the order was taken.
    pub minutes_waiting: i64,
}

/// The kitchen board after filtering and sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitchenQueue {
    pub tickets: Vec<KitchenTicket>,
    /// Pending orders in the whole queue, regardless of the filter.
    pub pending_count: usize,
    /// In-kitchen orders in the whole queue, regardless of the filter.
    pub in_kitchen_count: usize,
}

/// Whether `order` belongs on the kitchen board at all.
#[inline]
pub fn is_kitchen_order(order: &Order) -> bool {
    order.status().is_in_kitchen_queue() && order.has_food()
}

/// Time `order` has been waiting at `now`, never negative.
pub fn waiting_time(order: &Order, now: DateTime<Utc>) -> Duration {
    (now - order.timestamp()).max(Duration::zero())
}

/// Builds the kitchen board.
///
/// ## Steps
/// 1. Keep orders with food that are pending or in the kitchen
/// 2. Count pending / in-kitchen over that set
/// 3. Apply the status `filter`
/// 4. Sort ascending by `sort` (stable, ties keep stored order)
/// 5. Attach priority and minutes waiting as of `now`
pub fn kitchen_queue(
    orders: &[Order],
    filter: KitchenFilter,
    sort: KitchenSort,
    now: DateTime<Utc>,
) -> KitchenQueue {
    let queue: Vec<&Order> = orders.iter().filter(|o| is_kitchen_order(o)).collect();

    let pending_count = queue
        .iter()
        .filter(|o| o.status() == OrderStatus::Pending)
        .count();
    let in_kitchen_count = queue.len() - pending_count;

    let mut shown: Vec<&Order> = queue
        .into_iter()
        .filter(|o| filter.accepts(o.status()))
        .collect();

    match sort {
        KitchenSort::Time => shown.sort_by_key(|o| o.timestamp()),
        KitchenSort::Table => shown.sort_by_key(|o| o.table_number()),
    }

    let tickets = shown
        .into_iter()
        .map(|order| {
            let waiting = waiting_time(order, now);
            KitchenTicket {
                order: order.clone(),
                priority: Priority::for_waiting(waiting),
                minutes_waiting: waiting.num_minutes(),
            }
        })
        .collect();

    KitchenQueue {
        tickets,
        pending_count,
        in_kitchen_count,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Category, OrderItem};

    fn item(category: Category) -> OrderItem {
        OrderItem {
            product_id: category.as_str().to_string(),
            product_name: category.as_str().to_string(),
            quantity: 1,
            price: Money::from_cents(1000),
            category,
        }
    }

    fn order_at(id: &str, table: u32, at: DateTime<Utc>, categories: &[Category]) -> Order {
        let items = categories.iter().map(|c| item(*c)).collect();
        Order::create(id.to_string(), table, items, None, at).unwrap()
    }

    fn ids(queue: &KitchenQueue) -> Vec<&str> {
        queue.tickets.iter().map(|t| t.order.id()).collect()
    }

    #[test]
    fn test_priority_boundaries() {
        assert_eq!(Priority::for_waiting(Duration::minutes(0)), Priority::Low);
        assert_eq!(Priority::for_waiting(Duration::minutes(15)), Priority::Low);
        assert_eq!(
            Priority::for_waiting(Duration::minutes(15) + Duration::seconds(1)),
            Priority::Medium
        );
        assert_eq!(Priority::for_waiting(Duration::minutes(30)), Priority::Medium);
        assert_eq!(
            Priority::for_waiting(Duration::minutes(30) + Duration::seconds(1)),
            Priority::High
        );
        assert_eq!(Priority::for_waiting(Duration::minutes(-5)), Priority::Low);
    }

    #[test]
    fn test_queue_excludes_drinks_only_and_finished() {
        let now = Utc::now();
        let mut ready = order_at("ready", 1, now, &[Category::Plato]);
        ready.advance_to(OrderStatus::Ready);
        let orders = vec![
            order_at("food", 1, now, &[Category::Plato, Category::Bebida]),
            order_at("drinks", 2, now, &[Category::Bebida]),
            ready,
        ];

        let queue = kitchen_queue(&orders, KitchenFilter::All, KitchenSort::Time, now);
        assert_eq!(ids(&queue), vec!["food"]);
    }

    #[test]
    fn test_order_leaves_queue_when_ready() {
        let now = Utc::now();
        let mut orders = vec![order_at("a", 5, now, &[Category::Entrada])];

        let in_queue = |orders: &[Order]| {
            !kitchen_queue(orders, KitchenFilter::All, KitchenSort::Time, now)
                .tickets
                .is_empty()
        };

        assert!(in_queue(&orders));
        orders[0].advance_to(OrderStatus::InKitchen);
        assert!(in_queue(&orders));
        orders[0].advance_to(OrderStatus::Ready);
        assert!(!in_queue(&orders));
    }

    #[test]
    fn test_sort_by_time_and_table() {
        let now = Utc::now();
        let orders = vec![
            order_at("late-t1", 1, now - Duration::minutes(5), &[Category::Plato]),
            order_at("early-t9", 9, now - Duration::minutes(40), &[Category::Plato]),
            order_at("mid-t4", 4, now - Duration::minutes(20), &[Category::Plato]),
        ];

        let by_time = kitchen_queue(&orders, KitchenFilter::All, KitchenSort::Time, now);
        assert_eq!(ids(&by_time), vec!["early-t9", "mid-t4", "late-t1"]);
        assert_eq!(
            by_time.tickets.iter().map(|t| t.priority).collect::<Vec<_>>(),
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
        assert_eq!(by_time.tickets[0].minutes_waiting, 40);

        let by_table = kitchen_queue(&orders, KitchenFilter::All, KitchenSort::Table, now);
        assert_eq!(ids(&by_table), vec!["late-t1", "mid-t4", "early-t9"]);
    }

    #[test]
    fn test_filter_keeps_counts_of_whole_queue() {
        let now = Utc::now();
        let mut cooking = order_at("cooking", 2, now, &[Category::Plato]);
        cooking.advance_to(OrderStatus::InKitchen);
        let orders = vec![order_at("new", 1, now, &[Category::Postre]), cooking];

        let pending = kitchen_queue(&orders, KitchenFilter::Pending, KitchenSort::Time, now);
        assert_eq!(ids(&pending), vec!["new"]);
        assert_eq!(pending.pending_count, 1);
        assert_eq!(pending.in_kitchen_count, 1);

        let in_kitchen = kitchen_queue(&orders, KitchenFilter::InKitchen, KitchenSort::Time, now);
        assert_eq!(ids(&in_kitchen), vec!["cooking"]);
    }

    #[test]
    fn test_queue_is_idempotent() {
        let now = Utc::now();
        let orders = vec![
            order_at("a", 3, now - Duration::minutes(16), &[Category::Plato]),
            order_at("b", 1, now - Duration::minutes(2), &[Category::Entrada]),
        ];
        assert_eq!(
            kitchen_queue(&orders, KitchenFilter::All, KitchenSort::Table, now),
            kitchen_queue(&orders, KitchenFilter::All, KitchenSort::Table, now)
        );
    }
}
