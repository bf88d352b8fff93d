//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  SaleLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  product (copy) │       │
//! │  │  name           │   │  timestamp      │   │  quantity       │       │
//! │  │  price (f64)    │   │  items ─────────┼──►│  unit_amount    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product and Sale are entities (stored in repositories).               │
//! │  SaleLineItem only ever lives inside a Sale.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item embeds a copy of the product and freezes its price when it is
//! added. Renaming or repricing the catalog product afterwards never changes
//! a recorded sale.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::entity::{next_id, Entity, EntityId, Totalizable};
use crate::validation::{validate_price, validate_product_name, validate_quantity, ValidationResult};
use crate::TIMESTAMP_FORMAT;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier, time-derived.
    id: EntityId,

    /// Display name shown on listings and receipts.
    name: String,

    /// Unit price. Finite and never negative.
    price: f64,
}

impl Product {
    /// Creates a product with a fresh id.
    ///
    /// The name is stored trimmed.
    ///
    /// ## Errors
    /// - `Required` / `TooLong` for a bad name
    /// - `NotFinite` / `MustBeNonNegative` for a bad price
    pub fn new(name: impl Into<String>, price: f64) -> ValidationResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            id: next_id(),
            name: name.trim().to_string(),
            price,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Renames the product, with the same rules as [`Product::new`].
    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_product_name(&name)?;
        self.name = name.trim().to_string();
        Ok(())
    }

    /// Changes the unit price, with the same rules as [`Product::new`].
    pub fn set_price(&mut self, price: f64) -> ValidationResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }
}

impl Entity for Product {
    fn id(&self) -> EntityId {
        self.id
    }

    fn render(&self) -> String {
        format!(
            "Product[ID={}, Name={}, Price={:.2}]",
            self.id, self.name, self.price
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// A line in a sale: a frozen product copy plus a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SaleLineItem {
    /// Product as it was when the line was added.
    product: Product,
    quantity: i64,
    /// Unit price captured from the product at insertion time.
    unit_amount: f64,
}

impl SaleLineItem {
    fn capture(product: &Product, quantity: i64) -> Self {
        SaleLineItem {
            product: product.clone(),
            quantity,
            unit_amount: product.price(),
        }
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn unit_amount(&self) -> f64 {
        self.unit_amount
    }

    /// Line total (unit amount × quantity).
    pub fn line_total(&self) -> f64 {
        self.unit_amount * self.quantity as f64
    }
}

impl Totalizable for SaleLineItem {
    fn total(&self) -> f64 {
        self.line_total()
    }
}

impl fmt::Display for SaleLineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>15} {:8.2} x {:5} = {:8.2}",
            self.product.name(),
            self.unit_amount,
            self.quantity,
            self.line_total()
        )
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction.
///
/// ## Invariants
/// - `id` and `timestamp` are fixed at creation
/// - Items keep insertion order
/// - `total()` is recomputed from the items on every call, never cached
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Sale {
    id: EntityId,
    #[ts(as = "String")]
    timestamp: DateTime<Utc>,
    items: Vec<SaleLineItem>,
}

impl Sale {
    /// Creates an empty sale stamped with the current time.
    pub fn new() -> Self {
        Sale {
            id: next_id(),
            timestamp: Utc::now(),
            items: Vec::new(),
        }
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[inline]
    pub fn items(&self) -> &[SaleLineItem] {
        &self.items
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a line for `product`, freezing its current price.
    ///
    /// ## Errors
    /// `MustBePositive` when `quantity <= 0`; the sale is left untouched.
    pub fn add_line_item(&mut self, product: &Product, quantity: i64) -> ValidationResult<()> {
        validate_quantity(quantity)?;

        self.items.push(SaleLineItem::capture(product, quantity));
        debug!(
            sale_id = self.id,
            product = %product.name(),
            quantity,
            "Added line item"
        );
        Ok(())
    }

    /// Removes the item at `position` (0-based), shifting later items left.
    ///
    /// Returns `false` and does nothing when `position` is out of range.
    pub fn remove_item_by_position(&mut self, position: usize) -> bool {
        if position >= self.items.len() {
            return false;
        }

        let removed = self.items.remove(position);
        debug!(
            sale_id = self.id,
            position,
            product = %removed.product.name(),
            "Removed line item"
        );
        true
    }

    /// Removes every item whose product name matches `name`, ignoring case.
    ///
    /// Unlike the repositories, which remove only the first match, this drops
    /// all matching lines. Returns how many were removed.
    pub fn remove_item_by_name(&mut self, name: &str) -> usize {
        let before = self.items.len();

        self.items.retain(|item| !eq_ignore_case(item.product.name(), name));

        let removed = before - self.items.len();
        debug!(sale_id = self.id, name, removed, "Removed line items by name");
        removed
    }

    /// Sum of all line totals; `0.0` for an empty sale.
    pub fn total(&self) -> f64 {
        self.items.iter().map(SaleLineItem::line_total).sum()
    }
}

/// Case-insensitive comparison, one character at a time.
///
/// `str::to_lowercase` maps a word-final `Σ` to `ς`, so "ΟΔΟΣ" and "οδοσ"
/// would differ; per-character lowering treats them as equal.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl Default for Sale {
    fn default() -> Self {
        Sale::new()
    }
}

impl Totalizable for Sale {
    fn total(&self) -> f64 {
        Sale::total(self)
    }
}

impl Entity for Sale {
    fn id(&self) -> EntityId {
        self.id
    }

    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.items.len() + 3);
        lines.push(format!(
            "Sale[ID={}, Timestamp={}]",
            self.id,
            self.timestamp.format(TIMESTAMP_FORMAT)
        ));
        lines.push("Items:".to_string());
        lines.extend(self.items.iter().map(|item| format!("  {item}")));
        lines.push(format!("TOTAL: {:.2}", self.total()));
        lines.join("\n")
    }
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const EPSILON: f64 = 1e-9;

    fn product(name: &str, price: f64) -> Product {
        Product::new(name, price).unwrap()
    }

    #[test]
    fn test_product_new_trims_name() {
        let p = product("  Widget ", 9.99);
        assert_eq!(p.name(), "Widget");
        assert_eq!(p.price(), 9.99);
        assert!(p.id() > 0);
    }

    #[test]
    fn test_product_new_rejects_invalid_input() {
        assert!(matches!(
            Product::new("", 1.0),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Product::new("Widget", -1.0),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(Product::new("Widget", 0.0).is_ok());
    }

    #[test]
    fn test_product_ids_are_unique() {
        let a = product("A", 1.0);
        let b = product("B", 1.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_product_setters_validate() {
        let mut p = product("Widget", 9.99);
        assert!(p.set_price(-2.0).is_err());
        assert_eq!(p.price(), 9.99);

        p.set_price(12.5).unwrap();
        p.set_name("Gadget").unwrap();
        assert_eq!(p.price(), 12.5);
        assert_eq!(p.name(), "Gadget");

        assert!(p.set_name("  ").is_err());
        assert_eq!(p.name(), "Gadget");
    }

    #[test]
    fn test_product_render() {
        let p = product("Widget", 9.5);
        assert_eq!(
            p.render(),
            format!("Product[ID={}, Name=Widget, Price=9.50]", p.id())
        );
        assert_eq!(p.to_string(), p.render());
    }

    #[test]
    fn test_empty_sale_total_is_zero() {
        let sale = Sale::new();
        assert!(sale.is_empty());
        assert_eq!(sale.total(), 0.0);
    }

    #[test]
    fn test_widget_scenario_total() {
        let widget = product("Widget", 9.99);
        let mut sale = Sale::new();

        sale.add_line_item(&widget, 3).unwrap();

        assert_eq!(sale.item_count(), 1);
        assert!((sale.total() - 29.97).abs() < EPSILON);
    }

    #[test]
    fn test_add_line_item_rejects_non_positive_quantity() {
        let widget = product("Widget", 9.99);
        let mut sale = Sale::new();

        assert!(sale.add_line_item(&widget, 0).is_err());
        assert!(sale.add_line_item(&widget, -3).is_err());
        assert!(sale.is_empty());
    }

    #[test]
    fn test_line_item_freezes_price() {
        let mut widget = product("Widget", 10.0);
        let mut sale = Sale::new();
        sale.add_line_item(&widget, 2).unwrap();

        widget.set_price(99.0).unwrap();
        widget.set_name("Renamed").unwrap();

        let item = &sale.items()[0];
        assert_eq!(item.unit_amount(), 10.0);
        assert_eq!(item.product().name(), "Widget");
        assert!((sale.total() - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_remove_item_by_name_is_case_insensitive() {
        let a = product("A", 10.0);
        let b = product("B", 5.0);
        let mut sale = Sale::new();
        sale.add_line_item(&a, 1).unwrap();
        sale.add_line_item(&b, 2).unwrap();

        let removed = sale.remove_item_by_name("a");

        assert_eq!(removed, 1);
        assert_eq!(sale.item_count(), 1);
        assert_eq!(sale.items()[0].product().name(), "B");
        assert!((sale.total() - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_remove_item_by_name_removes_all_matches() {
        let soda = product("Soda", 1.5);
        let chips = product("Chips", 2.0);
        let mut sale = Sale::new();
        sale.add_line_item(&soda, 1).unwrap();
        sale.add_line_item(&chips, 1).unwrap();
        sale.add_line_item(&soda, 4).unwrap();

        assert_eq!(sale.remove_item_by_name("SODA"), 2);
        assert_eq!(sale.item_count(), 1);
        assert_eq!(sale.remove_item_by_name("missing"), 0);
    }

    #[test]
    fn test_remove_item_by_position_out_of_range_is_noop() {
        let a = product("A", 1.0);
        let mut sale = Sale::new();
        sale.add_line_item(&a, 1).unwrap();
        sale.add_line_item(&a, 2).unwrap();

        assert!(!sale.remove_item_by_position(5));
        assert!(!sale.remove_item_by_position(2));
        assert_eq!(sale.item_count(), 2);
    }

    #[test]
    fn test_remove_item_by_position_shifts_later_items() {
        let a = product("A", 1.0);
        let b = product("B", 2.0);
        let c = product("C", 3.0);
        let mut sale = Sale::new();
        for p in [&a, &b, &c] {
            sale.add_line_item(p, 1).unwrap();
        }

        assert!(sale.remove_item_by_position(0));

        let names: Vec<&str> = sale.items().iter().map(|i| i.product().name()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_totalizable_matches_inherent_totals() {
        let a = product("A", 2.5);
        let mut sale = Sale::new();
        sale.add_line_item(&a, 4).unwrap();

        let as_total: &dyn Totalizable = &sale;
        assert!((as_total.total() - 10.0).abs() < EPSILON);
        assert!((Totalizable::total(&sale.items()[0]) - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_sale_render() {
        let a = product("Widget", 9.99);
        let mut sale = Sale::new();
        sale.add_line_item(&a, 3).unwrap();

        let rendered = sale.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(&format!("Sale[ID={}, Timestamp=", sale.id())));
        assert_eq!(lines[1], "Items:");
        assert_eq!(lines[2], "           Widget     9.99 x     3 =    29.97");
        assert_eq!(lines[3], "TOTAL: 29.97");
    }

    #[test]
    fn test_sale_serializes_items() {
        let a = product("Widget", 1.25);
        let mut sale = Sale::new();
        sale.add_line_item(&a, 2).unwrap();

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["id"], sale.id());
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["product"]["name"], "Widget");
    }

    #[test]
    fn test_remove_item_by_name_ignores_final_sigma() {
        let road = product("ΟΔΟΣ", 2.0);
        let mut sale = Sale::new();
        sale.add_line_item(&road, 1).unwrap();

        assert_eq!(sale.remove_item_by_name("οδοσ"), 1);
        assert!(sale.is_empty());
    }

    #[test]
    fn test_remove_item_by_name_requires_whole_name() {
        let mut sale = Sale::new();
        sale.add_line_item(&product("Widget", 1.0), 1).unwrap();

        assert_eq!(sale.remove_item_by_name("widg"), 0);
        assert_eq!(sale.remove_item_by_name("widgets"), 0);
        assert_eq!(sale.item_count(), 1);
    }
}
