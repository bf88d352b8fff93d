//! # Repository Module
//!
//! The generic in-memory repository and its specializations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository<E: Entity>                                │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │  find_first(|p| p.name() == "Widget")                           │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                          │
//! │  │ Mutex<Vec<E>>  (one lock per repository)  │                          │
//! │  │                                           │                          │
//! │  │  [0] Product{Soda}      ✗                 │                          │
//! │  │  [1] Product{Widget}    ✓ ← first match   │  linear scan, insertion  │
//! │  │  [2] Product{Widget}                      │  order                   │
//! │  └───────────────────────────────────────────┘                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Some(clone of [1])   or   None (not found, never an error)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Every operation holds the lock for its whole scan, so operations on one
//!   repository are mutually exclusive.
//! - Callers only ever get clones: `find_first` returns a copy, `list`
//!   returns a snapshot.
//! - Ids are not re-checked for uniqueness; entity constructors hand out
//!   unique ids.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product catalog
//! - [`SaleRepository`](sale::SaleRepository) - Recorded sales

pub mod product;
pub mod sale;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use till_core::Entity;
use tracing::trace;

/// A concurrency-safe, ordered, linear-scan collection of entities.
///
/// This is a handle: cloning it yields another handle onto the same storage.
#[derive(Debug)]
pub struct Repository<E> {
    entries: Arc<Mutex<Vec<E>>>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<E> Default for Repository<E> {
    fn default() -> Self {
        Repository {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<E: Entity + Clone> Repository<E> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock, clearing any poison.
    ///
    /// Predicates only read, so a panicking predicate leaves the vector
    /// intact. The `apply` closure of [`update_first`](Self::update_first)
    /// is the one caller code that writes under the lock: if it panics, the
    /// element it was editing keeps whatever it had written so far.
    fn lock(&self) -> MutexGuard<'_, Vec<E>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `entity` to the end of the sequence.
    pub fn add(&self, entity: E) {
        let mut entries = self.lock();
        trace!(id = entity.id(), "Adding entity");
        entries.push(entity);
    }

    /// Returns a copy of the first entity matching `predicate`, in order.
    pub fn find_first<P>(&self, mut predicate: P) -> Option<E>
    where
        P: FnMut(&E) -> bool,
    {
        self.lock().iter().find(|entity| predicate(entity)).cloned()
    }

    /// Removes the first entity matching `predicate`.
    ///
    /// At most one entity is removed even when several match. Later entities
    /// shift down by one. Returns whether anything was removed.
    pub fn remove_first<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&E) -> bool,
    {
        let mut entries = self.lock();
        match entries.iter().position(predicate) {
            Some(index) => {
                let removed = entries.remove(index);
                trace!(id = removed.id(), index, "Removed entity");
                true
            }
            None => false,
        }
    }

    /// Applies `apply` in place to the first entity matching `predicate`.
    ///
    /// Returns `None` when nothing matched, otherwise whatever `apply`
    /// returned. `apply` must not panic: a panic leaves the entity partly
    /// edited, and later callers see it that way.
    pub fn update_first<P, M, R>(&self, predicate: P, apply: M) -> Option<R>
    where
        P: FnMut(&E) -> bool,
        M: FnOnce(&mut E) -> R,
    {
        let mut entries = self.lock();
        let index = entries.iter().position(predicate)?;
        Some(apply(&mut entries[index]))
    }

    /// Returns a snapshot of the current contents.
    ///
    /// The snapshot does not follow later mutations, and mutating it does not
    /// touch the repository.
    pub fn list(&self) -> Vec<E> {
        self.lock().clone()
    }

    /// Formats every entity with `formatter` and joins the results with
    /// newlines, in listing order.
    pub fn render<F>(&self, formatter: F) -> String
    where
        F: FnMut(&E) -> String,
    {
        self.lock()
            .iter()
            .map(formatter)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// [`render`](Self::render) using each entity's own rendering.
    pub fn render_entities(&self) -> String {
        self.render(|entity| entity.render())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether both handles point at the same storage.
    pub fn shares_storage_with(&self, other: &Repository<E>) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use till_core::Product;

    fn product(name: &str, price: f64) -> Product {
        Product::new(name, price).unwrap()
    }

    fn names(repo: &Repository<Product>) -> Vec<String> {
        repo.list().iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn test_find_first_returns_every_added_entity() {
        let repo = Repository::new();
        let products: Vec<Product> = (0..10).map(|i| product(&format!("P{i}"), i as f64)).collect();
        for p in &products {
            repo.add(p.clone());
        }

        for p in &products {
            assert_eq!(repo.find_first(|e| e.id() == p.id()).as_ref(), Some(p));
        }
        assert!(repo.find_first(|e| e.id() == -1).is_none());
    }

    #[test]
    fn test_find_first_is_first_in_insertion_order() {
        let repo = Repository::new();
        let first = product("Widget", 1.0);
        let second = product("Widget", 2.0);
        repo.add(first.clone());
        repo.add(second);

        let found = repo.find_first(|p| p.name() == "Widget").unwrap();
        assert_eq!(found.id(), first.id());
    }

    #[test]
    fn test_remove_first_removes_at_most_one() {
        let repo = Repository::new();
        repo.add(product("Widget", 1.0));
        repo.add(product("Soda", 1.0));
        repo.add(product("Widget", 2.0));

        assert!(repo.remove_first(|p| p.name() == "Widget"));
        assert_eq!(names(&repo), vec!["Soda", "Widget"]);
        assert_eq!(repo.find_first(|p| p.name() == "Widget").unwrap().price(), 2.0);
    }

    #[test]
    fn test_remove_first_missing_is_noop() {
        let repo = Repository::new();
        repo.add(product("Soda", 1.0));

        assert!(!repo.remove_first(|p| p.name() == "Widget"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_list_size_after_adds_and_removes() {
        let repo = Repository::new();
        let products: Vec<Product> = (0..8).map(|i| product(&format!("P{i}"), 1.0)).collect();
        for p in &products {
            repo.add(p.clone());
        }

        for p in products.iter().step_by(3) {
            assert!(repo.remove_first(|e| e.id() == p.id()));
        }

        // 8 added, ids 0, 3 and 6 removed
        assert_eq!(repo.list().len(), 5);
        assert_eq!(names(&repo), vec!["P1", "P2", "P4", "P5", "P7"]);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let repo = Repository::new();
        repo.add(product("Soda", 1.0));

        let mut snapshot = repo.list();
        snapshot.clear();
        repo.add(product("Widget", 1.0));

        assert!(snapshot.is_empty());
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_update_first_edits_in_place() {
        let repo = Repository::new();
        let soda = product("Soda", 1.0);
        repo.add(soda.clone());

        let result = repo.update_first(|p| p.id() == soda.id(), |p| p.set_price(1.5));
        assert_eq!(result, Some(Ok(())));
        assert_eq!(repo.find_first(|p| p.id() == soda.id()).unwrap().price(), 1.5);

        let missing = repo.update_first(|p| p.id() == -1, |p| p.set_price(3.0));
        assert!(missing.is_none());
    }

    #[test]
    fn test_render_joins_with_newlines() {
        let repo = Repository::new();
        assert_eq!(repo.render(|p: &Product| p.name().to_string()), "");

        repo.add(product("Soda", 1.0));
        repo.add(product("Widget", 2.0));

        assert_eq!(repo.render(|p| p.name().to_string()), "Soda\nWidget");

        let rendered = repo.render_entities();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.starts_with("Product["));
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo = Repository::new();
        let handle = repo.clone();
        handle.add(product("Soda", 1.0));

        assert_eq!(repo.len(), 1);
        assert!(repo.shares_storage_with(&handle));
        assert!(!repo.shares_storage_with(&Repository::new()));
    }

    #[test]
    fn test_panicking_predicate_leaves_repository_usable() {
        let repo = Repository::new();
        repo.add(product("Soda", 1.0));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            repo.remove_first(|_| panic!("predicate failure"));
        }));
        assert!(result.is_err());

        assert_eq!(repo.len(), 1);
        assert!(repo.remove_first(|p| p.name() == "Soda"));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_panicking_update_keeps_partial_edit_and_repository_usable() {
        let repo = Repository::new();
        let soda = product("Soda", 1.0);
        repo.add(soda.clone());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            repo.update_first(
                |p| p.id() == soda.id(),
                |p| {
                    p.set_price(2.0).unwrap();
                    panic!("edit failure");
                },
            );
        }));
        assert!(result.is_err());

        // The lock is usable again and the write made before the panic stays.
        let stored = repo.find_first(|p| p.id() == soda.id()).unwrap();
        assert_eq!(stored.price(), 2.0);
        assert_eq!(stored.name(), "Soda");
        assert_eq!(repo.update_first(|p| p.id() == soda.id(), |p| p.set_price(3.0)), Some(Ok(())));
    }
}
