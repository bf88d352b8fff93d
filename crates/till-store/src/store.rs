//! # Store
//!
//! Composition of the product catalog and the sale log.
//!
//! ## Two Ways to Get One
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Construction                                 │
//! │                                                                         │
//! │  Store::new()     ──► fresh, independent repositories                  │
//! │                       (tests, embedding several stores in one process) │
//! │                                                                         │
//! │  Store::global()  ──► handles onto the process-wide repositories       │
//! │                       (ProductRepository::global / SaleRepository::    │
//! │                        global, each created exactly once)              │
//! │                                                                         │
//! │  Either way the application builds ONE Store at its entry point and    │
//! │  passes `&Store` to whatever needs the catalogs.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;

/// Both repositories of a running till.
///
/// Cloning a `Store` clones the handles, not the data.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: ProductRepository,
    sales: SaleRepository,
}

impl Store {
    /// Creates a store with its own empty repositories.
    pub fn new() -> Self {
        debug!("Creating standalone store");
        Store {
            products: ProductRepository::new(),
            sales: SaleRepository::new(),
        }
    }

    /// Returns a store backed by the process-wide repositories.
    pub fn global() -> Self {
        Store {
            products: ProductRepository::global().clone(),
            sales: SaleRepository::global().clone(),
        }
    }

    /// Returns the product repository.
    #[inline]
    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    /// Returns the sale repository.
    #[inline]
    pub fn sales(&self) -> &SaleRepository {
        &self.sales
    }
}
