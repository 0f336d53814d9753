//! # Product Repository
//!
//! The menu catalog. An empty store serves the default menu until the first
//! write.

use tracing::debug;

use crate::error::DbResult;
use crate::repository::UpdateOutcome;
use crate::store::{load, save, Collection, CollectionStore};
use restobar_core::catalog::default_products;
use restobar_core::{Product, ProductUpdate};

/// Repository for the product collection.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(&store);
///
/// let menu = repo.list().await?;
/// repo.toggle_availability("8").await?;
/// ```
#[derive(Debug)]
pub struct ProductRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: CollectionStore> ProductRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        ProductRepository { store }
    }

    /// Every product, in catalog order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        match load(self.store, Collection::Products).await? {
            Some(products) => Ok(products),
            None => {
                debug!("No stored menu, serving defaults");
                Ok(default_products())
            }
        }
    }

    /// Replaces the whole catalog.
    pub async fn save_all(&self, products: &[Product]) -> DbResult<()> {
        debug!(count = products.len(), "Saving products");
        save(self.store, Collection::Products, products).await
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    /// Appends a product to the catalog.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        let mut products = self.list().await?;
        products.push(product.clone());
        self.save_all(&products).await?;

        debug!(id = %product.id, name = %product.name, "Inserted product");
        Ok(())
    }

    /// Applies a partial update to the product with `id`.
    pub async fn update(&self, id: &str, update: &ProductUpdate) -> DbResult<UpdateOutcome> {
        self.modify(id, |product| update.apply_to(product)).await
    }

    /// Flips `available` of the product with `id`.
    pub async fn toggle_availability(&self, id: &str) -> DbResult<UpdateOutcome> {
        self.modify(id, |product| product.available = !product.available)
            .await
    }

    /// Removes the product with `id`. Orders keep their snapshots.
    pub async fn delete(&self, id: &str) -> DbResult<UpdateOutcome> {
        let mut products = self.list().await?;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            debug!(id = %id, "Delete skipped, product not found");
            return Ok(UpdateOutcome::NotFound);
        }

        self.save_all(&products).await?;
        debug!(id = %id, "Deleted product");
        Ok(UpdateOutcome::Applied)
    }

    async fn modify(&self, id: &str, change: impl FnOnce(&mut Product)) -> DbResult<UpdateOutcome> {
        let mut products = self.list().await?;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            debug!(id = %id, "Update skipped, product not found");
            return Ok(UpdateOutcome::NotFound);
        };
        change(product);

        self.save_all(&products).await?;
        debug!(id = %id, "Updated product");
        Ok(UpdateOutcome::Applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DetachedStore, MemoryStore};
    use restobar_core::{Category, Money};

    fn arepa() -> Product {
        Product {
            id: "arepa".to_string(),
            name: "Arepa".to_string(),
            price: Money::from_cents(1800),
            category: Category::Plato,
            available: true,
        }
    }

    #[tokio::test]
    async fn test_empty_store_serves_default_menu() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(&store);

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 11);
        assert_eq!(
            repo.get_by_id("1").await.unwrap().map(|p| p.name),
            Some("Tequeños".to_string())
        );
    }

    #[tokio::test]
    async fn test_insert_update_delete() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(&store);

        repo.insert(&arepa()).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 12);

        let update = ProductUpdate {
            price: Some(Money::from_cents(2000)),
            ..Default::default()
        };
        assert_eq!(repo.update("arepa", &update).await.unwrap(), UpdateOutcome::Applied);
        let stored = repo.get_by_id("arepa").await.unwrap().unwrap();
        assert_eq!(stored.price.cents(), 2000);
        assert_eq!(stored.name, "Arepa");

        assert_eq!(repo.delete("arepa").await.unwrap(), UpdateOutcome::Applied);
        assert!(repo.get_by_id("arepa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_misses_are_not_errors() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(&store);

        assert_eq!(
            repo.update("nope", &ProductUpdate::default()).await.unwrap(),
            UpdateOutcome::NotFound
        );
        assert_eq!(repo.delete("nope").await.unwrap(), UpdateOutcome::NotFound);
        assert_eq!(
            repo.toggle_availability("nope").await.unwrap(),
            UpdateOutcome::NotFound
        );
        // nothing was written
        assert!(store.get_raw(Collection::Products).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(&store);

        repo.toggle_availability("8").await.unwrap();
        assert!(!repo.get_by_id("8").await.unwrap().unwrap().available);
        repo.toggle_availability("8").await.unwrap();
        assert!(repo.get_by_id("8").await.unwrap().unwrap().available);
    }

    #[tokio::test]
    async fn test_detached_store_keeps_defaults() {
        let store = DetachedStore;
        let repo = ProductRepository::new(&store);

        repo.insert(&arepa()).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 11);
    }
}
