//! # Floor View
//!
//! Table occupancy derived from orders. Nothing here is stored: every call
//! recomputes from the orders it is given.
//!
//! ```text
//! orders ──► index active orders by table ──► TableSummary per table
//!              (status != paid)                 Available / Occupied
//!                                                needs_attention = any Ready
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::types::{Order, OrderStatus, Table};

/// Derived state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Available,
    Occupied,
}

/// What the tables grid shows for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub number: u32,
    pub occupancy: Occupancy,
    /// At least one order is ready to be served.
    pub needs_attention: bool,
    pub active_orders: usize,
    pub pending_orders: usize,
    pub preparing_orders: usize,
    pub ready_orders: usize,
}

impl TableSummary {
    fn from_orders(number: u32, orders: &[&Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status() == status).count();
        let ready_orders = count(OrderStatus::Ready);

        TableSummary {
            number,
            occupancy: if orders.is_empty() {
                Occupancy::Available
            } else {
                Occupancy::Occupied
            },
            needs_attention: ready_orders > 0,
            active_orders: orders.len(),
            pending_orders: count(OrderStatus::Pending),
            preparing_orders: count(OrderStatus::InKitchen),
            ready_orders,
        }
    }
}

// =============================================================================
// Active Order Index
// =============================================================================

/// Non-paid orders grouped by table number.
#[derive(Debug, Default)]
pub struct ActiveOrders<'a> {
    by_table: BTreeMap<u32, Vec<&'a Order>>,
}

impl<'a> ActiveOrders<'a> {
    /// Builds the index in one pass over `orders`.
    pub fn index(orders: &'a [Order]) -> Self {
        let mut by_table: BTreeMap<u32, Vec<&'a Order>> = BTreeMap::new();
        for order in orders.iter().filter(|o| o.status().is_active()) {
            by_table.entry(order.table_number()).or_default().push(order);
        }
        ActiveOrders { by_table }
    }

    /// Active orders of `table_number`, in stored order.
    pub fn for_table(&self, table_number: u32) -> &[&'a Order] {
        self.by_table
            .get(&table_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn summary(&self, table_number: u32) -> TableSummary {
        TableSummary::from_orders(table_number, self.for_table(table_number))
    }

    /// Table numbers that currently have at least one active order.
    pub fn occupied_tables(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_table.keys().copied()
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Occupied iff the table has at least one order that is not paid.
pub fn table_occupancy(orders: &[Order], table_number: u32) -> Occupancy {
    let occupied = orders
        .iter()
        .any(|o| o.table_number() == table_number && o.status().is_active());

    if occupied {
        Occupancy::Occupied
    } else {
        Occupancy::Available
    }
}

/// Summary of a single table.
pub fn table_summary(orders: &[Order], table_number: u32) -> TableSummary {
    ActiveOrders::index(orders).summary(table_number)
}

/// One summary per table of the floor, in the floor's order.
pub fn floor_overview(tables: &[Table], orders: &[Order]) -> Vec<TableSummary> {
    let active = ActiveOrders::index(orders);
    tables.iter().map(|t| active.summary(t.number)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
