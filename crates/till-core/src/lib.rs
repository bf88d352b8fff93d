//! # till-core: Pure Domain Model for Till POS
//!
//! This crate holds the domain model of Till POS: the entity contract,
//! products, sales and their line items, plus the validation rules that
//! keep every constructed value well-formed. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (terminal menus)                    │   │
//! │  │    Product menu ──► Sale menu ──► Receipt                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               till-store (in-memory repositories)               │   │
//! │  │        Repository<E> ──► ProductRepository / SaleRepository     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  entity   │  │   types   │  │   error   │  │ validation│  │   │
//! │  │   │  Entity   │  │  Product  │  │ CoreError │  │   rules   │  │   │
//! │  │   │  next_id  │  │   Sale    │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entity`] - The `Entity` and `Totalizable` capabilities, id generation
//! - [`types`] - Domain types (Product, Sale, SaleLineItem)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Product, Sale};
//!
//! let widget = Product::new("Widget", 9.99).unwrap();
//!
//! let mut sale = Sale::new();
//! sale.add_line_item(&widget, 3).unwrap();
//!
//! assert!((sale.total() - 29.97).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entity;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use entity::{next_id, Entity, EntityId, Totalizable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Format used when a sale timestamp is shown on a receipt.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
