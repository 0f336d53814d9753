//! # Cashier Views
//!
//! Read-only projections of the orders for the three cashier screens, plus
//! the paid-sales totals they show.
//!
//! ```text
//! ┌──────────┬─────────────────────────────────────┬────────────────────┐
//! │ View     │ Orders shown                        │ Can settle payment │
//! ├──────────┼─────────────────────────────────────┼────────────────────┤
//! │ Food     │ any status, has food, newest first  │ no (history)       │
//! │ Drinks   │ any status, has drinks, newest first│ no (history)       │
//! │ General  │ ready orders, oldest first          │ yes                │
//! └──────────┴─────────────────────────────────────┴────────────────────┘
//! ```

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, OrderStatus};

/// Which cashier screen is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CashierView {
    Food,
    Drinks,
    General,
}

impl CashierView {
    /// Only the general cashier takes money.
    #[inline]
    pub const fn can_settle(&self) -> bool {
        matches!(self, CashierView::General)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CashierView::Food => "food",
            CashierView::Drinks => "drinks",
            CashierView::General => "general",
        }
    }
}

impl fmt::Display for CashierView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orders listed on `view`.
pub fn cashier_orders(orders: &[Order], view: CashierView) -> Vec<&Order> {
    let mut listed: Vec<&Order> = match view {
        CashierView::Food => orders.iter().filter(|o| o.has_food()).collect(),
        CashierView::Drinks => orders.iter().filter(|o| o.has_drinks()).collect(),
        CashierView::General => orders
            .iter()
            .filter(|o| o.status() == OrderStatus::Ready)
            .collect(),
    };

    match view {
        CashierView::Food | CashierView::Drinks => {
            listed.sort_by_key(|o| Reverse(o.timestamp()))
        }
        CashierView::General => listed.sort_by_key(|o| o.timestamp()),
    }

    listed
}

// =============================================================================
// Totals
// =============================================================================

/// Paid sales split by bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub food: Money,
    pub drinks: Money,
    /// food + drinks.
    pub general: Money,
}

impl SalesTotals {
    fn from_paid<'a>(orders: impl Iterator<Item = &'a Order>) -> Self {
        let mut totals = SalesTotals::default();
        for order in orders {
            totals.food += order.food_total();
            totals.drinks += order.drink_total();
        }
        totals.general = totals.food + totals.drinks;
        totals
    }
}

/// Every paid order ever recorded.
pub fn paid_totals(orders: &[Order]) -> SalesTotals {
    SalesTotals::from_paid(orders.iter().filter(|o| o.status() == OrderStatus::Paid))
}

/// Paid orders whose timestamp falls on the same calendar day as `now`, in
/// `now`'s time zone.
///
/// Pass `Local::now()` for the register's own day; tests pass fixed
/// instants in a fixed zone.
pub fn daily_totals<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> SalesTotals {
    let zone = now.timezone();
    let today = now.date_naive();

    SalesTotals::from_paid(orders.iter().filter(|o| {
        o.status() == OrderStatus::Paid
            && o.timestamp().with_timezone(&zone).date_naive() == today
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
