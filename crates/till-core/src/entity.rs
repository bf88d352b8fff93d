//! # Entity Contract
//!
//! Capabilities shared by everything a repository can hold.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Id Generation                                      │
//! │                                                                         │
//! │  Product::new() / Sale::new()                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next_id() ← Unix time in milliseconds                                 │
//! │       │                                                                 │
//! │       ├── clock advanced?      → use the new timestamp                 │
//! │       │                                                                 │
//! │       └── same ms / went back? → previous id + 1                       │
//! │                                                                         │
//! │  Result: strictly increasing ids for the life of the process, even     │
//! │  when several entities are created within one millisecond.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Identifier type shared by every entity.
pub type EntityId = i64;

/// Anything a repository can store: a unique id plus a textual rendering.
pub trait Entity {
    /// Returns the identifier assigned at construction.
    fn id(&self) -> EntityId;

    /// Returns a human-readable, possibly multi-line, description.
    fn render(&self) -> String;
}

/// Anything that can report a monetary total.
pub trait Totalizable {
    fn total(&self) -> f64;
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Returns a fresh, time-derived entity id.
///
/// Ids never repeat within a process and are strictly increasing.
pub fn next_id() -> EntityId {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);

    loop {
        let candidate = if now > last { now } else { last + 1 };
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}
