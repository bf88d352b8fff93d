//! # Sale Repository
//!
//! The log of recorded sales. Sales have no name, so every lookup is by id.

use std::sync::OnceLock;

use till_core::{Entity, EntityId, Sale};
use tracing::{debug, info};

use super::Repository;

static GLOBAL: OnceLock<SaleRepository> = OnceLock::new();

/// Repository for recorded sales.
#[derive(Debug, Clone, Default)]
pub struct SaleRepository {
    inner: Repository<Sale>,
}

impl SaleRepository {
    pub fn new() -> Self {
        SaleRepository {
            inner: Repository::new(),
        }
    }

    /// Returns the process-wide sale log, creating it on first use.
    pub fn global() -> &'static SaleRepository {
        GLOBAL.get_or_init(|| {
            info!("Creating process-wide sale repository");
            SaleRepository::new()
        })
    }

    pub fn add(&self, sale: Sale) {
        debug!(
            id = sale.id(),
            items = sale.item_count(),
            total = sale.total(),
            "Recording sale"
        );
        self.inner.add(sale);
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<Sale> {
        self.inner.find_first(|s| s.id() == id)
    }

    /// Removes the sale with this id.
    ///
    /// An unknown id is a no-op that returns `false`.
    pub fn remove_by_id(&self, id: EntityId) -> bool {
        let removed = self.inner.remove_first(|s| s.id() == id);
        debug!(id, removed, "Remove sale by id");
        removed
    }

    pub fn list(&self) -> Vec<Sale> {
        self.inner.list()
    }

    /// Every sale's receipt rendering, with a blank line between sales.
    pub fn render(&self) -> String {
        self.inner
            .list()
            .iter()
            .map(Entity::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn render_with<F>(&self, formatter: F) -> String
    where
        F: FnMut(&Sale) -> String,
    {
        self.inner.render(formatter)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn shares_storage_with(&self, other: &SaleRepository) -> bool {
        self.inner.shares_storage_with(&other.inner)
    }
}
