//! # Restaurant Service
//!
//! The one object the screens talk to. It owns a [`CollectionStore`] and the
//! [`RestobarConfig`], loads what each call needs, runs the pure logic from
//! `restobar-core` and writes back.
//!
//! ## Operation Map
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬──────────────────┐
//! │ Screen               │ Operation                    │ Writes           │
//! ├──────────────────────┼──────────────────────────────┼──────────────────┤
//! │ Tables grid          │ floor_overview, table_summary│ -                │
//! │ Order pad            │ menu, draft_from_catalog,    │ orders           │
//! │                      │ place_order, create_order    │                  │
//! │ Kitchen board        │ kitchen_queue, advance_order,│ orders, products │
//! │                      │ toggle_product               │                  │
//! │ Cashier              │ cashier_orders, quote_payment│ orders           │
//! │                      │ settle_payment, daily_totals │                  │
//! │ Menu admin           │ add/update/delete_product    │ products         │
//! └──────────────────────┴──────────────────────────────┴──────────────────┘
//! ```
//!
//! Each call is a read-modify-write of whole collections. A single writer
//! is assumed; two processes sharing a database can lose updates.

use chrono::{Local, Utc};
use tracing::{debug, info, warn};

use crate::config::RestobarConfig;
use crate::error::DbResult;
use crate::repository::{OrderRepository, ProductRepository, TableRepository, UpdateOutcome};
use crate::store::{Collection, CollectionStore};
use restobar_core::catalog::{self, AvailabilityFilter, CategorySection};
use restobar_core::order::generate_order_id;
use restobar_core::{
    cashier, floor, kitchen, payment, CashierView, Category, CoreError, KitchenFilter,
    KitchenQueue, KitchenSort, Order, OrderDraft, OrderItem, OrderStatus, PaymentQuote,
    PaymentRequest, Percent, Product, ProductUpdate, SalesTotals, Settlement, Table,
    TableSummary,
};

/// What [`Restaurant::install_defaults`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub menu_written: bool,
    pub floor_written: bool,
    pub orders_kept: usize,
}

/// Restaurant front and back of house over one store.
#[derive(Debug)]
pub struct Restaurant<S> {
    store: S,
    config: RestobarConfig,
}

impl<S: CollectionStore> Restaurant<S> {
    pub fn new(store: S, config: RestobarConfig) -> Self {
        Restaurant { store, config }
    }

    pub fn config(&self) -> &RestobarConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn products(&self) -> ProductRepository<'_, S> {
        ProductRepository::new(&self.store)
    }

    pub fn tables(&self) -> TableRepository<'_, S> {
        TableRepository::new(&self.store, self.config.table_count)
    }

    pub fn orders(&self) -> OrderRepository<'_, S> {
        OrderRepository::new(&self.store)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Menu grouped by category.
    pub async fn menu(&self, filter: AvailabilityFilter) -> DbResult<Vec<CategorySection>> {
        let products = self.products().list().await?;
        Ok(catalog::menu_sections(&products, filter))
    }

    /// Adds a product from the admin form.
    pub async fn add_product(
        &self,
        name: &str,
        price_input: &str,
        category: Category,
    ) -> DbResult<Product> {
        let product = catalog::new_product(name, price_input, category)?;
        self.products().insert(&product).await?;

        info!(id = %product.id, name = %product.name, price = %product.price, "Product added");
        Ok(product)
    }

    /// Partially updates a product after validating the new values.
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> DbResult<UpdateOutcome> {
        let update = catalog::validate_update(update)?;
        self.products().update(id, &update).await
    }

    pub async fn delete_product(&self, id: &str) -> DbResult<UpdateOutcome> {
        self.products().delete(id).await
    }

    /// Marks a dish as run out, or back in stock.
    pub async fn toggle_product(&self, id: &str) -> DbResult<UpdateOutcome> {
        self.products().toggle_availability(id).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Builds an order pad from `(product id, quantity)` lines, snapshotting
    /// the current catalog.
    ///
    /// ## Errors
    /// - `ProductNotFound` for an id missing from the catalog
    /// - `ProductUnavailable` for a product the kitchen switched off
    pub async fn draft_from_catalog(&self, lines: &[(&str, u32)]) -> DbResult<OrderDraft> {
        let products = self.products().list().await?;
        let mut draft = OrderDraft::new();

        for (product_id, quantity) in lines {
            let product = products
                .iter()
                .find(|p| p.id == *product_id)
                .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
            draft.add_quantity(product, *quantity)?;
        }

        Ok(draft)
    }

    /// Creates a pending order from already snapshotted items.
    ///
    /// Nothing is stored when validation fails.
    pub async fn create_order(
        &self,
        table_number: u32,
        items: Vec<OrderItem>,
        waiter_name: Option<&str>,
    ) -> DbResult<Order> {
        let waiter = waiter_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.config.unassigned_waiter);

        let order = Order::create(
            generate_order_id(),
            table_number,
            items,
            Some(waiter),
            Utc::now(),
        )?;
        self.orders().insert(&order).await?;

        info!(
            order_id = %order.id(),
            table = table_number,
            waiter = %order.waiter_name(),
            food_items = order.food_items().len(),
            drink_items = order.drink_items().len(),
            "Order created"
        );
        Ok(order)
    }

    /// Order pad and creation in one step.
    pub async fn place_order(
        &self,
        table_number: u32,
        lines: &[(&str, u32)],
        waiter_name: Option<&str>,
    ) -> DbResult<Order> {
        let draft = self.draft_from_catalog(lines).await?;
        self.create_order(table_number, draft.into_items(), waiter_name)
            .await
    }

    /// Moves an order forward. Backward or repeated requests are ignored.
    pub async fn advance_order(&self, order_id: &str, target: OrderStatus) -> DbResult<UpdateOutcome> {
        self.orders().update_status(order_id, target).await
    }

    /// Every order of a table, history included.
    pub async fn orders_for_table(&self, table_number: u32) -> DbResult<Vec<Order>> {
        self.orders().for_table(table_number).await
    }

    // =========================================================================
    // Floor and Kitchen
    // =========================================================================

    pub async fn list_tables(&self) -> DbResult<Vec<Table>> {
        self.tables().list().await
    }

    /// One summary per table, occupancy derived from the current orders.
    pub async fn floor_overview(&self) -> DbResult<Vec<TableSummary>> {
        let tables = self.tables().list().await?;
        let orders = self.orders().list().await?;
        Ok(floor::floor_overview(&tables, &orders))
    }

    pub async fn table_summary(&self, table_number: u32) -> DbResult<TableSummary> {
        let orders = self.orders().list().await?;
        Ok(floor::table_summary(&orders, table_number))
    }

    /// Kitchen board as of now.
    pub async fn kitchen_queue(&self, filter: KitchenFilter, sort: KitchenSort) -> DbResult<KitchenQueue> {
        let orders = self.orders().list().await?;
        let queue = kitchen::kitchen_queue(&orders, filter, sort, Utc::now());

        debug!(
            shown = queue.tickets.len(),
            pending = queue.pending_count,
            in_kitchen = queue.in_kitchen_count,
            "Kitchen queue built"
        );
        Ok(queue)
    }

    // =========================================================================
    // Cashier
    // =========================================================================

    pub async fn cashier_orders(&self, view: CashierView) -> DbResult<Vec<Order>> {
        let orders = self.orders().list().await?;
        Ok(cashier::cashier_orders(&orders, view)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Paid sales of the register's local calendar day.
    pub async fn daily_totals(&self) -> DbResult<SalesTotals> {
        let orders = self.orders().list().await?;
        Ok(cashier::daily_totals(&orders, &Local::now()))
    }

    /// Paid sales since the first order.
    pub async fn paid_totals(&self) -> DbResult<SalesTotals> {
        let orders = self.orders().list().await?;
        Ok(cashier::paid_totals(&orders))
    }

    /// Breakdown shown while the cashier types discount and tip.
    pub async fn quote_payment(
        &self,
        order_id: &str,
        discount: Percent,
        tip: Percent,
    ) -> DbResult<PaymentQuote> {
        let order = self.require_order(order_id).await?;
        Ok(payment::quote(&order, discount, tip)?)
    }

    /// Takes the payment for an order and marks it paid.
    ///
    /// ## Steps
    /// 1. Only the general cashier may settle (`PaymentNotAllowed`)
    /// 2. Load the order (`OrderNotFound`)
    /// 3. Quote and check tender (see [`payment::settle`])
    /// 4. Mark the order paid, the only write
    ///
    /// Any failure before step 4 leaves the store untouched.
    pub async fn settle_payment(
        &self,
        view: CashierView,
        order_id: &str,
        request: &PaymentRequest,
    ) -> DbResult<Settlement> {
        if !view.can_settle() {
            warn!(view = %view, order_id = %order_id, "Payment attempted outside general cashier");
            return Err(CoreError::PaymentNotAllowed {
                view: view.to_string(),
            }
            .into());
        }

        let order = self.require_order(order_id).await?;
        let settlement = payment::settle(&order, request)?;

        match self.orders().update_status(order_id, OrderStatus::Paid).await? {
            UpdateOutcome::Applied => {}
            UpdateOutcome::NotFound => {
                return Err(CoreError::OrderNotFound(order_id.to_string()).into())
            }
            UpdateOutcome::Ignored => {
                return Err(CoreError::InvalidOrderStatus {
                    order_id: order_id.to_string(),
                    current_status: OrderStatus::Paid.to_string(),
                }
                .into())
            }
        }

        info!(
            order_id = %order_id,
            table = settlement.table_number,
            method = ?settlement.method,
            final_total = %settlement.quote.final_total,
            change = ?settlement.change,
            "Payment settled"
        );
        Ok(settlement)
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Writes the default menu and floor where nothing is stored yet.
    ///
    /// `reset_menu` / `reset_floor` overwrite what is stored. Orders are never
    /// written: paid orders are the sales history.
    pub async fn install_defaults(&self, reset_menu: bool, reset_floor: bool) -> DbResult<SeedReport> {
        let menu_written =
            reset_menu || self.store.get_raw(Collection::Products).await?.is_none();
        if menu_written {
            self.products().save_all(&catalog::default_products()).await?;
        }

        let floor_written = reset_floor || self.store.get_raw(Collection::Tables).await?.is_none();
        if floor_written {
            let tables = catalog::default_tables(self.config.table_count);
            self.tables().save_all(&tables).await?;
        }

        let report = SeedReport {
            menu_written,
            floor_written,
            orders_kept: self.orders().list().await?.len(),
        };
        info!(?report, "Defaults installed");
        Ok(report)
    }

    async fn require_order(&self, order_id: &str) -> DbResult<Order> {
        self.orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()).into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::store::{DetachedStore, MemoryStore};
    use restobar_core::{Decimal, Money, Occupancy, ValidationError};

    fn restaurant() -> Restaurant<MemoryStore> {
        Restaurant::new(MemoryStore::new(), RestobarConfig::default())
    }

    fn table(floor: &[TableSummary], number: u32) -> &TableSummary {
        floor.iter().find(|t| t.number == number).unwrap()
    }

    #[tokio::test]
    async fn test_order_at_table_five() {
        let r = restaurant();

        // Tequeños x2 at 28.50
        let order = r.place_order(5, &[("1", 2)], None).await.unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total().cents(), 5700);
        assert_eq!(order.food_items().len(), 1);
        assert!(order.drink_items().is_empty());
        assert_eq!(order.waiter_name(), "unassigned");

        let floor = r.floor_overview().await.unwrap();
        assert_eq!(table(&floor, 5).occupancy, Occupancy::Occupied);
        assert_eq!(table(&floor, 4).occupancy, Occupancy::Available);
    }

    #[tokio::test]
    async fn test_kitchen_flow() {
        let r = restaurant();
        let order = r.place_order(5, &[("1", 2)], Some("Ana")).await.unwrap();

        let in_queue = |queue: &KitchenQueue| queue.tickets.iter().any(|t| t.order.id() == order.id());

        let queue = r.kitchen_queue(KitchenFilter::All, KitchenSort::Time).await.unwrap();
        assert!(in_queue(&queue));

        r.advance_order(order.id(), OrderStatus::InKitchen).await.unwrap();
        let queue = r.kitchen_queue(KitchenFilter::All, KitchenSort::Time).await.unwrap();
        assert!(in_queue(&queue));
        assert_eq!(queue.in_kitchen_count, 1);

        r.advance_order(order.id(), OrderStatus::Ready).await.unwrap();
        let queue = r.kitchen_queue(KitchenFilter::All, KitchenSort::Time).await.unwrap();
        assert!(!in_queue(&queue));

        let summary = r.table_summary(5).await.unwrap();
        assert!(summary.needs_attention);
        assert_eq!(summary.ready_orders, 1);
    }

    #[tokio::test]
    async fn test_cash_payment_with_discount_and_tip() {
        let r = restaurant();
        let order = r.place_order(5, &[("1", 2)], None).await.unwrap();
        r.advance_order(order.id(), OrderStatus::Ready).await.unwrap();

        let request = PaymentRequest::cash(
            Percent::from_whole(10),
            Percent::from_whole(15),
            Money::from_cents(6000),
        );
        let settlement = r
            .settle_payment(CashierView::General, order.id(), &request)
            .await
            .unwrap();

        assert_eq!(settlement.quote.discount_amount, Decimal::new(570, 2));
        assert_eq!(settlement.quote.after_discount, Decimal::new(5130, 2));
        assert_eq!(settlement.quote.tip_amount, Decimal::new(7695, 3));
        assert_eq!(settlement.quote.final_total, Decimal::new(58995, 3));
        assert_eq!(settlement.change, Some(Decimal::new(1005, 3)));

        let stored = r.orders().get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Paid);

        let floor = r.floor_overview().await.unwrap();
        assert_eq!(table(&floor, 5).occupancy, Occupancy::Available);

        // totals count the order's items, before discount and tip
        let today = r.daily_totals().await.unwrap();
        assert_eq!(today.food.cents(), 5700);
        assert!(today.drinks.is_zero());
        assert_eq!(r.paid_totals().await.unwrap(), today);
    }

    #[tokio::test]
    async fn test_insufficient_cash_changes_nothing() {
        let r = restaurant();
        let order = r.place_order(5, &[("1", 2)], None).await.unwrap();

        let request = PaymentRequest::cash(Percent::zero(), Percent::zero(), Money::from_cents(5000));
        let err = r
            .settle_payment(CashierView::General, order.id(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::InsufficientTender { .. })));

        let stored = r.orders().get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_cash_a_fraction_of_a_centimo_short_is_refused() {
        let r = restaurant();
        // Tequeños 28.50 less 33% is 19.095
        let order = r.place_order(2, &[("1", 1)], None).await.unwrap();

        let request =
            PaymentRequest::cash(Percent::from_whole(33), Percent::zero(), Money::from_cents(1909));
        let err = r
            .settle_payment(CashierView::General, order.id(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::InsufficientTender { .. })));

        let stored = r.orders().get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Pending);
        assert_eq!(
            table(&r.floor_overview().await.unwrap(), 2).occupancy,
            Occupancy::Occupied
        );
    }

    #[tokio::test]
    async fn test_only_general_cashier_settles() {
        let r = restaurant();
        let order = r.place_order(3, &[("7", 1)], None).await.unwrap();
        let request = PaymentRequest::mobile_wallet(Percent::zero(), Percent::zero());

        for view in [CashierView::Food, CashierView::Drinks] {
            let err = r.settle_payment(view, order.id(), &request).await.unwrap_err();
            assert!(matches!(err, DbError::Core(CoreError::PaymentNotAllowed { .. })));
        }

        r.settle_payment(CashierView::General, order.id(), &request)
            .await
            .unwrap();
        // a second payment is rejected
        let err = r
            .settle_payment(CashierView::General, order.id(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::InvalidOrderStatus { .. })));
    }

    #[tokio::test]
    async fn test_unknown_order_payment() {
        let r = restaurant();
        let err = r
            .quote_payment("ghost", Percent::zero(), Percent::zero())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_order_validation_stores_nothing() {
        let r = restaurant();

        let err = r.create_order(5, Vec::new(), None).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::EmptyOrder)));

        let err = r.place_order(5, &[("999", 1)], None).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::ProductNotFound(_))));

        let err = r.place_order(0, &[("1", 1)], None).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));

        assert!(r.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_product_cannot_be_ordered() {
        let r = restaurant();
        assert!(r.toggle_product("8").await.unwrap().is_applied());

        let err = r.place_order(2, &[("8", 1)], None).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::ProductUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_items_are_snapshots() {
        let r = restaurant();
        let order = r.place_order(1, &[("5", 1), ("8", 2)], None).await.unwrap();

        let update = ProductUpdate {
            price: Some(Money::from_cents(9900)),
            ..Default::default()
        };
        r.update_product("5", update).await.unwrap();
        r.delete_product("8").await.unwrap();

        let stored = r.orders().get_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.total().cents(), 6000 + 2 * 850);
        assert_eq!(stored.drink_items()[0].product_name, "Coca Cola");
    }

    #[tokio::test]
    async fn test_cashier_views() {
        let r = restaurant();
        let food = r.place_order(1, &[("4", 1)], None).await.unwrap();
        let drinks = r.place_order(2, &[("9", 2)], None).await.unwrap();
        r.advance_order(drinks.id(), OrderStatus::Ready).await.unwrap();

        let food_view = r.cashier_orders(CashierView::Food).await.unwrap();
        assert_eq!(food_view.len(), 1);
        assert_eq!(food_view[0].id(), food.id());

        let general = r.cashier_orders(CashierView::General).await.unwrap();
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].id(), drinks.id());
    }

    #[tokio::test]
    async fn test_configured_waiter_sentinel() {
        let config = RestobarConfig {
            unassigned_waiter: "sin mesero".to_string(),
            ..Default::default()
        };
        let r = Restaurant::new(MemoryStore::new(), config);

        let order = r.place_order(1, &[("1", 1)], Some("  ")).await.unwrap();
        assert_eq!(order.waiter_name(), "sin mesero");
    }

    #[tokio::test]
    async fn test_menu_admin() {
        let r = restaurant();

        let product = r.add_product(" Arepa ", "18.50", Category::Plato).await.unwrap();
        assert_eq!(product.name, "Arepa");

        let err = r.add_product("Arepa", "-1", Category::Plato).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));

        let bad = ProductUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        let err = r.update_product(&product.id, bad).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));

        assert_eq!(
            r.update_product("ghost", ProductUpdate::default()).await.unwrap(),
            UpdateOutcome::NotFound
        );

        let sections = r.menu(AvailabilityFilter::All).await.unwrap();
        let platos = sections.iter().find(|s| s.category == Category::Plato).unwrap();
        assert_eq!(platos.total_count, 4);
    }

    #[tokio::test]
    async fn test_install_defaults_keeps_orders_and_edits() {
        let r = restaurant();

        let first = r.install_defaults(false, false).await.unwrap();
        assert!(first.menu_written && first.floor_written);
        assert_eq!(first.orders_kept, 0);

        let order = r.place_order(5, &[("1", 2)], None).await.unwrap();
        r.settle_payment(
            CashierView::General,
            order.id(),
            &PaymentRequest::mobile_wallet(Percent::zero(), Percent::zero()),
        )
        .await
        .unwrap();
        r.place_order(6, &[("7", 1)], None).await.unwrap();
        r.delete_product("11").await.unwrap();

        // Second run leaves the edited menu alone
        let again = r.install_defaults(false, false).await.unwrap();
        assert!(!again.menu_written && !again.floor_written);
        assert_eq!(r.products().list().await.unwrap().len(), 10);

        // Resetting the menu restores it and still keeps every order
        let reset = r.install_defaults(true, true).await.unwrap();
        assert!(reset.menu_written && reset.floor_written);
        assert_eq!(reset.orders_kept, 2);
        assert_eq!(r.products().list().await.unwrap().len(), 11);
        assert_eq!(r.paid_totals().await.unwrap().general.cents(), 5700);
    }

    #[tokio::test]
    async fn test_detached_store_serves_defaults() {
        let r = Restaurant::new(DetachedStore, RestobarConfig::default());

        assert_eq!(r.list_tables().await.unwrap().len(), 20);
        assert_eq!(r.menu(AvailabilityFilter::All).await.unwrap().len(), 4);

        // the order is built but goes nowhere
        r.place_order(5, &[("1", 1)], None).await.unwrap();
        assert!(r.orders().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_backed_flow() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let r = Restaurant::new(db, RestobarConfig::default());

        let order = r.place_order(5, &[("1", 2), ("7", 1)], None).await.unwrap();
        r.advance_order(order.id(), OrderStatus::Ready).await.unwrap();

        let quote = r
            .quote_payment(order.id(), Percent::zero(), Percent::zero())
            .await
            .unwrap();
        assert_eq!(quote.food_total.cents(), 5700);
        assert_eq!(quote.drink_total.cents(), 1200);

        let history = r.orders_for_table(5).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status(), OrderStatus::Ready);
    }
}
