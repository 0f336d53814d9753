//! # Order Repository
//!
//! Orders are appended once and afterwards only their status changes. Paid
//! orders stay in the collection as history.
//!
//! ## Status Writes
//! ```text
//! update_status(id, target)
//!   ├── id unknown                    → NotFound  (nothing saved)
//!   ├── target not ahead of current   → Ignored   (nothing saved)
//!   └── otherwise                     → Applied   (collection saved)
//! ```

use tracing::{debug, info};

use crate::error::DbResult;
use crate::repository::UpdateOutcome;
use crate::store::{load, save, Collection, CollectionStore};
use restobar_core::{Order, OrderStatus, StatusChange};

#[derive(Debug)]
pub struct OrderRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: CollectionStore> OrderRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        OrderRepository { store }
    }

    /// Every order ever taken, in creation order.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        Ok(load(self.store, Collection::Orders).await?.unwrap_or_default())
    }

    /// Replaces the whole collection.
    pub async fn save_all(&self, orders: &[Order]) -> DbResult<()> {
        debug!(count = orders.len(), "Saving orders");
        save(self.store, Collection::Orders, orders).await
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        Ok(self.list().await?.into_iter().find(|o| o.id() == id))
    }

    /// All orders of a table, paid ones included.
    pub async fn for_table(&self, table_number: u32) -> DbResult<Vec<Order>> {
        let mut orders = self.list().await?;
        orders.retain(|o| o.table_number() == table_number);
        Ok(orders)
    }

    /// Appends a new order.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        let mut orders = self.list().await?;
        orders.push(order.clone());
        self.save_all(&orders).await?;

        info!(
            order_id = %order.id(),
            table = order.table_number(),
            total = %order.total(),
            "Order stored"
        );
        Ok(())
    }

    /// Moves the order with `id` forward to `target`.
    pub async fn update_status(&self, id: &str, target: OrderStatus) -> DbResult<UpdateOutcome> {
        let mut orders = self.list().await?;

        let Some(order) = orders.iter_mut().find(|o| o.id() == id) else {
            debug!(order_id = %id, "Status update skipped, order not found");
            return Ok(UpdateOutcome::NotFound);
        };

        match order.advance_to(target) {
            StatusChange::Applied { from, to } => {
                self.save_all(&orders).await?;
                info!(order_id = %id, %from, %to, "Order status changed");
                Ok(UpdateOutcome::Applied)
            }
            StatusChange::Ignored { current, requested } => {
                debug!(
                    order_id = %id,
                    %current,
                    %requested,
                    "Status update ignored, order would move backwards"
                );
                Ok(UpdateOutcome::Ignored)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
