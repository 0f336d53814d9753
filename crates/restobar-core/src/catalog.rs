//! # Menu Catalog
//!
//! Default menu and floor, admin input handling and the category grouping
//! used by the order pad and the kitchen's availability screen.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Category, Product, ProductUpdate, Table};
use crate::validation::{parse_price, validate_price, validate_product_name};

// =============================================================================
// Defaults
// =============================================================================

/// (id, name, price in céntimos, category) of the opening menu.
const DEFAULT_MENU: &[(&str, &str, i64, Category)] = &[
    ("1", "Tequeños", 2850, Category::Entrada),
    ("2", "Empanadas", 2000, Category::Entrada),
    ("3", "Patacones", 2300, Category::Entrada),
    ("4", "Pabellón Criollo", 5000, Category::Plato),
    ("5", "Asado Negro", 6000, Category::Plato),
    ("6", "Pollo a la Plancha", 4000, Category::Plato),
    ("7", "Cerveza Polar", 1200, Category::Bebida),
    ("8", "Coca Cola", 850, Category::Bebida),
    ("9", "Jugo Natural", 1300, Category::Bebida),
    ("10", "Tres Leches", 1850, Category::Postre),
    ("11", "Quesillo", 1500, Category::Postre),
];

/// Menu served when nothing has been stored yet. Everything is available.
pub fn default_products() -> Vec<Product> {
    DEFAULT_MENU
        .iter()
        .map(|(id, name, cents, category)| Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_cents(*cents),
            category: *category,
            available: true,
        })
        .collect()
}

/// Tables numbered `1..=count`.
pub fn default_tables(count: u32) -> Vec<Table> {
    (1..=count).map(|number| Table { number }).collect()
}

// =============================================================================
// Admin Input
// =============================================================================

pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds a product from the admin form.
///
/// `price_input` is the text typed in the form ("28.50"). New products are
/// available.
pub fn new_product(name: &str, price_input: &str, category: Category) -> CoreResult<Product> {
    let name = validate_product_name(name)?;
    let price = parse_price(price_input)?;

    Ok(Product {
        id: generate_product_id(),
        name,
        price,
        category,
        available: true,
    })
}

/// Checks the fields an update would set, normalising the name.
pub fn validate_update(update: ProductUpdate) -> CoreResult<ProductUpdate> {
    let name = match update.name {
        Some(name) => Some(validate_product_name(&name)?),
        None => None,
    };
    if let Some(price) = update.price {
        validate_price(price)?;
    }

    Ok(ProductUpdate { name, ..update })
}

// =============================================================================
// Grouping
// =============================================================================

/// Availability filter of the kitchen's menu screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    fn accepts(&self, product: &Product) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => product.available,
            AvailabilityFilter::Unavailable => !product.available,
        }
    }
}

/// Products of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub category: Category,
    /// Products passing the filter, in catalog order.
    pub products: Vec<Product>,
    /// Counted before filtering.
    pub available_count: usize,
    pub total_count: usize,
}

/// Groups `products` by category in menu order (entradas, platos, bebidas,
/// postres). Categories without any product are left out.
pub fn menu_sections(products: &[Product], filter: AvailabilityFilter) -> Vec<CategorySection> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let in_category: Vec<&Product> =
                products.iter().filter(|p| p.category == *category).collect();
            if in_category.is_empty() {
                return None;
            }

            Some(CategorySection {
                category: *category,
                available_count: in_category.iter().filter(|p| p.available).count(),
                total_count: in_category.len(),
                products: in_category
                    .into_iter()
                    .filter(|p| filter.accepts(p))
                    .cloned()
                    .collect(),
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
