//! # Sale Menu
//!
//! Lists sales, rings up new ones and removes them by id.
//!
//! ## Ringing Up a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        New Sale Flow                                    │
//! │                                                                         │
//! │  1. Collect items ─────────────────────────────────────────────────────►│
//! │     product name (re-asked until it exists in the catalog)             │
//! │     quantity (re-asked until > 0)                                      │
//! │     "Add another product?" 1 = yes, anything else = done               │
//! │                                                                         │
//! │  2. Review ────────────────────────────────────────────────────────────►│
//! │     remove a line by its position (1-based on screen)                  │
//! │     remove every line for a product name (case-insensitive)            │
//! │                                                                         │
//! │  3. Close ─────────────────────────────────────────────────────────────►│
//! │     print the receipt, store the sale                                  │
//! │     a sale left with no lines is discarded                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use tracing::{debug, info};

use till_core::validation::validate_entity_id;
use till_core::{CoreError, Entity, Product, Sale};
use till_store::Store;

use crate::config::{OutputFormat, TillConfig};
use crate::error::CliResult;
use crate::menu::{Flow, Menu, INVALID_OPTION};
use crate::prompt::Prompt;

pub struct SaleMenu<'a> {
    store: &'a Store,
    config: &'a TillConfig,
}

impl<'a> SaleMenu<'a> {
    pub fn new(store: &'a Store, config: &'a TillConfig) -> Self {
        SaleMenu { store, config }
    }

    fn list<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let sales = self.store.sales();

        match self.config.output {
            OutputFormat::Text if sales.is_empty() => prompt.say("No sales registered."),
            OutputFormat::Text => prompt.say(sales.render()),
            OutputFormat::Json => {
                // The option prompt leaves the cursor mid-line.
                prompt.say("")?;
                for sale in sales.list() {
                    prompt.say(serde_json::to_string(&sale)?)?;
                }
                Ok(())
            }
        }
    }

    fn new_sale<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let mut sale = Sale::new();
        debug!(id = sale.id(), "Sale opened");

        loop {
            let product = self.ask_product(prompt)?;
            let quantity = ask_quantity(prompt)?;
            sale.add_line_item(&product, quantity)?;

            let again = prompt.ask("\nAdd another product to the sale (1-YES/0-NO)? ")?;
            if again != "1" {
                break;
            }
        }

        review(&mut sale, prompt)?;

        if sale.is_empty() {
            info!(id = sale.id(), "Sale discarded with no items");
            return prompt.say("Sale cancelled: no items left.");
        }

        prompt.say(format!("\n\nRECEIPT - {}", self.config.store_name))?;
        prompt.say(&sale)?;
        prompt.say(format!(
            "Amount due: {}",
            self.config.format_currency(sale.total())
        ))?;

        info!(id = sale.id(), items = sale.item_count(), total = sale.total(), "Sale completed");
        self.store.sales().add(sale);
        Ok(())
    }

    fn ask_product<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<Product> {
        loop {
            let name = prompt.ask("\nEnter the product name: ")?;
            match self.store.products().find_by_name(&name) {
                Some(product) => return Ok(product),
                None => prompt.say("Product not found. Try again.")?,
            }
        }
    }

    fn remove<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let id = loop {
            let parsed = prompt
                .ask_parsed::<i64>("\nEnter the id: ", "id")?
                .and_then(|id| validate_entity_id(id).map(|_| id));
            match parsed {
                Ok(id) => break id,
                Err(_) => prompt.say("Invalid ID. Try again.")?,
            }
        };

        if self.store.sales().remove_by_id(id) {
            info!(id, "Sale removed");
            prompt.say("Sale removed successfully.")
        } else {
            Err(CoreError::SaleNotFound(id).into())
        }
    }
}

impl Menu for SaleMenu<'_> {
    fn title(&self) -> &'static str {
        "SALE MENU"
    }

    fn options(&self) -> &'static [&'static str] {
        &["BACK", "LIST", "NEW SALE", "REMOVE"]
    }

    fn execute<R: BufRead, W: Write>(
        &self,
        option: usize,
        prompt: &mut Prompt<R, W>,
    ) -> CliResult<Flow> {
        match option {
            0 => return Ok(Flow::Back),
            1 => self.list(prompt)?,
            2 => self.new_sale(prompt)?,
            3 => self.remove(prompt)?,
            _ => prompt.say(INVALID_OPTION)?,
        }
        Ok(Flow::Continue)
    }
}

fn ask_quantity<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> CliResult<i64> {
    loop {
        match prompt.ask_parsed::<i64>("Enter the quantity: ", "quantity")? {
            Ok(quantity) if quantity > 0 => return Ok(quantity),
            _ => prompt.say("Invalid quantity. Try again.")?,
        }
    }
}

/// Lets the cashier drop lines before the sale is closed.
fn review<R: BufRead, W: Write>(sale: &mut Sale, prompt: &mut Prompt<R, W>) -> CliResult<()> {
    while !sale.is_empty() {
        prompt.say("\nCURRENT SALE")?;
        for (position, item) in sale.items().iter().enumerate() {
            prompt.say(format!("{:>3}. {item}", position + 1))?;
        }
        prompt.say(format!("TOTAL: {:.2}", sale.total()))?;
        prompt.say("0 -> FINISH")?;
        prompt.say("1 -> REMOVE ITEM BY POSITION")?;
        prompt.say("2 -> REMOVE ITEMS BY PRODUCT NAME")?;

        match prompt.ask("ENTER YOUR OPTION: ")?.as_str() {
            "0" => break,
            "1" => {
                let position = prompt.ask_parsed::<usize>("Enter the position: ", "position")?;
                // Positions on screen start at 1.
                let removed = match position {
                    Ok(position) if position >= 1 => sale.remove_item_by_position(position - 1),
                    _ => false,
                };
                if removed {
                    prompt.say("Item removed.")?;
                } else {
                    prompt.say("No item at that position.")?;
                }
            }
            "2" => {
                let name = prompt.ask("Enter the product name: ")?;
                match sale.remove_item_by_name(&name) {
                    0 => prompt.say(format!("No items for '{name}'."))?,
                    removed => prompt.say(format!("{removed} item(s) removed."))?,
                }
            }
            _ => prompt.say(INVALID_OPTION)?,
        }
    }
    Ok(())
}
