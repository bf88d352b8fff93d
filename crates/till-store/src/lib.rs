//! # till-store: In-Memory Repositories for Till POS
//!
//! This crate provides the storage layer of Till POS. Everything lives in
//! memory and is lost when the process exits.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Data Flow                               │
//! │                                                                         │
//! │  Sale menu (find product "Widget")                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐                   │   │
//! │  │   │    Store      │    │   Repositories    │                   │   │
//! │  │   │  (store.rs)   │    │                   │                   │   │
//! │  │   │               │    │ ProductRepository │                   │   │
//! │  │   │ products() ───┼───►│ SaleRepository    │                   │   │
//! │  │   │ sales()       │    │        │          │                   │   │
//! │  │   └───────────────┘    │        ▼          │                   │   │
//! │  │                        │  Repository<E>    │                   │   │
//! │  │                        │  Arc<Mutex<Vec>>  │                   │   │
//! │  │                        └───────────────────┘                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - Generic repository plus the product and sale catalogs
//! - [`store`] - Composition of both catalogs, explicit or process-wide
//!
//! ## Usage
//!
//! ```rust
//! use till_core::Product;
//! use till_store::Store;
//!
//! let store = Store::new();
//! store.products().add(Product::new("Widget", 9.99).unwrap());
//!
//! let widget = store.products().find_by_name("Widget");
//! assert!(widget.is_some());
//! assert!(store.products().find_by_name("Gadget").is_none());
//! ```

pub mod repository;
pub mod store;

pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::Repository;
pub use store::Store;
