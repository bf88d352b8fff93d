//! # Product Repository
//!
//! The product catalog.
//!
//! ## Lookups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Lookups                                      │
//! │                                                                         │
//! │  find_by_id(1718000000123)   → exact id match                          │
//! │  find_by_name("Widget")      → exact, case-sensitive name match        │
//! │                                                                         │
//! │  Names are NOT unique. Two products may both be called "Widget";       │
//! │  by-name lookups and removals act on the first one added.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::OnceLock;

use till_core::validation::{validate_price, validate_product_name, ValidationResult};
use till_core::{Entity, EntityId, Product};
use tracing::{debug, info};

use super::Repository;

static GLOBAL: OnceLock<ProductRepository> = OnceLock::new();

/// Repository for the product catalog.
///
/// ## Usage
/// ```rust
/// use till_core::{Entity, Product};
/// use till_store::ProductRepository;
///
/// let repo = ProductRepository::new();
/// let widget = Product::new("Widget", 9.99).unwrap();
/// repo.add(widget.clone());
///
/// assert_eq!(repo.find_by_id(widget.id()), Some(widget));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    inner: Repository<Product>,
}

impl ProductRepository {
    /// Creates a new, empty, independent catalog.
    pub fn new() -> Self {
        ProductRepository {
            inner: Repository::new(),
        }
    }

    /// Returns the process-wide catalog, creating it on first use.
    ///
    /// Every caller, on any thread, gets the same instance.
    pub fn global() -> &'static ProductRepository {
        GLOBAL.get_or_init(|| {
            info!("Creating process-wide product repository");
            ProductRepository::new()
        })
    }

    pub fn add(&self, product: Product) {
        debug!(id = product.id(), name = %product.name(), "Adding product");
        self.inner.add(product);
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Some(Product)` - Product found
    /// * `None` - Product not found
    pub fn find_by_id(&self, id: EntityId) -> Option<Product> {
        self.inner.find_first(|p| p.id() == id)
    }

    /// Gets the first product added under exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<Product> {
        self.inner.find_first(|p| p.name() == name)
    }

    /// Removes the product with this id. Returns whether one was removed.
    pub fn remove_by_id(&self, id: EntityId) -> bool {
        let removed = self.inner.remove_first(|p| p.id() == id);
        debug!(id, removed, "Remove product by id");
        removed
    }

    /// Removes the first product with exactly this name.
    pub fn remove_by_name(&self, name: &str) -> bool {
        let removed = self.inner.remove_first(|p| p.name() == name);
        debug!(name, removed, "Remove product by name");
        removed
    }

    /// Changes the catalog price of a product.
    ///
    /// Sales already recorded keep the price they captured.
    ///
    /// ## Returns
    /// * `Ok(true)` - Price updated
    /// * `Ok(false)` - No product with that id
    /// * `Err(_)` - `price` is negative or not finite
    pub fn update_price(&self, id: EntityId, price: f64) -> ValidationResult<bool> {
        validate_price(price)?;

        let updated = self
            .inner
            .update_first(|p| p.id() == id, |p| p.set_price(price))
            .transpose()?
            .is_some();

        debug!(id, price, updated, "Update product price");
        Ok(updated)
    }

    /// Renames a product. Same return convention as [`update_price`](Self::update_price).
    pub fn rename(&self, id: EntityId, name: &str) -> ValidationResult<bool> {
        validate_product_name(name)?;

        let updated = self
            .inner
            .update_first(|p| p.id() == id, |p| p.set_name(name))
            .transpose()?
            .is_some();

        debug!(id, name, updated, "Rename product");
        Ok(updated)
    }

    /// Snapshot of the catalog in listing order.
    pub fn list(&self) -> Vec<Product> {
        self.inner.list()
    }

    /// Every product's rendering, one per line.
    pub fn render(&self) -> String {
        self.inner.render_entities()
    }

    /// Renders with a caller-chosen format, one entry per line.
    pub fn render_with<F>(&self, formatter: F) -> String
    where
        F: FnMut(&Product) -> String,
    {
        self.inner.render(formatter)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether both handles point at the same catalog.
    pub fn shares_storage_with(&self, other: &ProductRepository) -> bool {
        self.inner.shares_storage_with(&other.inner)
    }
}
