//! # Demo Catalog
//!
//! A small product catalog for trying the till without typing products in
//! first. Enabled with `seed_demo_catalog = true` or `TILL_SEED_DEMO=1`.
//!
//! Products are grouped by aisle so listings read like a real shelf:
//! - Beverages
//! - Snacks
//! - Dairy
//! - Grocery

use tracing::{debug, info};

use till_core::Product;
use till_store::ProductRepository;

use crate::error::CliResult;

const DEMO_CATALOG: &[(&str, &[(&str, f64)])] = &[
    (
        "BEV",
        &[
            ("Cola 2L", 2.49),
            ("Sparkling Water", 0.99),
            ("Orange Juice", 3.29),
            ("Iced Tea", 1.79),
        ],
    ),
    (
        "SNK",
        &[
            ("Potato Chips", 1.99),
            ("Chocolate Bar", 1.25),
            ("Pretzels", 2.15),
        ],
    ),
    (
        "DRY",
        &[
            ("Whole Milk 1L", 1.49),
            ("Cheddar 200g", 3.99),
            ("Greek Yogurt", 0.89),
        ],
    ),
    (
        "GRO",
        &[
            ("Spaghetti 500g", 1.39),
            ("Basmati Rice 1kg", 2.79),
            ("Canned Tomatoes", 0.95),
        ],
    ),
];

/// Adds the demo catalog to `products`.
///
/// Does nothing when the repository already holds products, so a catalog
/// that was typed in is never mixed with demo data. Returns how many
/// products were added.
pub fn seed_demo_catalog(products: &ProductRepository) -> CliResult<usize> {
    if !products.is_empty() {
        info!(
            existing = products.len(),
            "Catalog not empty, skipping demo seed"
        );
        return Ok(0);
    }

    let mut added = 0;
    for (aisle, entries) in DEMO_CATALOG {
        for (name, price) in entries.iter() {
            products.add(Product::new(*name, *price)?);
            added += 1;
        }
        debug!(aisle, count = entries.len(), "Seeded aisle");
    }

    Ok(added)
}
