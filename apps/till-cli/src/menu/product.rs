//! Product catalog menu: list, add, remove by name, update price.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use till_core::{CoreError, Entity, Product, ValidationError};
use till_store::Store;

use crate::config::{OutputFormat, TillConfig};
use crate::error::CliResult;
use crate::menu::{Flow, Menu, INVALID_OPTION};
use crate::prompt::Prompt;

pub struct ProductMenu<'a> {
    store: &'a Store,
    config: &'a TillConfig,
}

impl<'a> ProductMenu<'a> {
    pub fn new(store: &'a Store, config: &'a TillConfig) -> Self {
        ProductMenu { store, config }
    }

    fn list<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let products = self.store.products();

        match self.config.output {
            OutputFormat::Text if products.is_empty() => prompt.say("No products registered."),
            OutputFormat::Text => prompt.say(products.render()),
            OutputFormat::Json => {
                // The option prompt leaves the cursor mid-line.
                prompt.say("")?;
                for product in products.list() {
                    prompt.say(serde_json::to_string(&product)?)?;
                }
                Ok(())
            }
        }
    }

    fn add<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let product = loop {
            let name = prompt.ask("\nEnter the name: ")?;
            let price = prompt.ask_parsed::<f64>("Enter the price: ", "price")?;

            match price.and_then(positive_price).and_then(|p| Product::new(name, p)) {
                Ok(product) => break product,
                Err(err) => {
                    warn!(error = %err, "Rejected product input");
                    prompt.say(format!("\n{err}. Please enter the data correctly.\n"))?;
                }
            }
        };

        info!(id = product.id(), name = product.name(), "Product added");
        self.store.products().add(product);
        prompt.say("Product added successfully!")
    }

    fn remove<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let name = ask_name(prompt)?;

        if self.store.products().remove_by_name(&name) {
            info!(name = %name, "Product removed");
            prompt.say("Product removed successfully!")
        } else {
            Err(CoreError::ProductNotFound(name).into())
        }
    }

    fn update_price<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        let name = ask_name(prompt)?;
        let Some(product) = self.store.products().find_by_name(&name) else {
            return Err(CoreError::ProductNotFound(name).into());
        };

        prompt.say(format!(
            "Current price: {}",
            self.config.format_currency(product.price())
        ))?;

        let price = loop {
            match prompt
                .ask_parsed::<f64>("Enter the new price: ", "price")?
                .and_then(positive_price)
            {
                Ok(price) => break price,
                Err(err) => prompt.say(format!("{err}. Try again."))?,
            }
        };

        if self.store.products().update_price(product.id(), price)? {
            info!(id = product.id(), price, "Product price updated");
            prompt.say("Price updated successfully!")
        } else {
            // Removed between lookup and update.
            Err(CoreError::ProductNotFound(name).into())
        }
    }
}

impl Menu for ProductMenu<'_> {
    fn title(&self) -> &'static str {
        "PRODUCT MENU"
    }

    fn options(&self) -> &'static [&'static str] {
        &["BACK", "LIST", "ADD", "REMOVE", "UPDATE PRICE"]
    }

    fn execute<R: BufRead, W: Write>(
        &self,
        option: usize,
        prompt: &mut Prompt<R, W>,
    ) -> CliResult<Flow> {
        match option {
            0 => return Ok(Flow::Back),
            1 => self.list(prompt)?,
            2 => self.add(prompt)?,
            3 => self.remove(prompt)?,
            4 => self.update_price(prompt)?,
            _ => prompt.say(INVALID_OPTION)?,
        }
        Ok(Flow::Continue)
    }
}

/// Asks until a non-empty name is entered.
fn ask_name<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> CliResult<String> {
    loop {
        let name = prompt.ask("\nEnter the name: ")?;
        if !name.is_empty() {
            return Ok(name);
        }
        prompt.say("\nPlease enter the name correctly.\n")?;
    }
}

/// The catalog accepts free items; the terminal only takes prices above zero.
fn positive_price(price: f64) -> Result<f64, ValidationError> {
    if price > 0.0 {
        Ok(price)
    } else {
        Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(store: &Store, config: &TillConfig, script: &str) -> String {
        let mut prompt = Prompt::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        ProductMenu::new(store, config).show(&mut prompt).unwrap();
        String::from_utf8(prompt.into_output()).unwrap()
    }

    #[test]
    fn test_add_then_list() {
        let store = Store::new();
        let output = run(&store, &TillConfig::default(), "2\nWidget\n9.99\n1\n0\n");

        assert!(output.contains("Product added successfully!"));
        let widget = store.products().find_by_name("Widget").unwrap();
        assert!(output.contains(&format!(
            "Product[ID={}, Name=Widget, Price=9.99]",
            widget.id()
        )));
    }

    #[test]
    fn test_add_reprompts_until_valid() {
        let store = Store::new();
        let output = run(
            &store,
            &TillConfig::default(),
            "2\n\n1.00\nSoda\nabc\nSoda\n0\nSoda\n1.50\n0\n",
        );

        assert!(output.contains("name is required. Please enter the data correctly."));
        assert!(output.contains("price has invalid format"));
        assert!(output.contains("price must be positive"));
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.products().find_by_name("Soda").unwrap().price(), 1.5);
    }

    #[test]
    fn test_remove_missing_product_reports_not_found() {
        let store = Store::new();
        let output = run(&store, &TillConfig::default(), "3\nGhost\n4\nGhost\n0\n");

        assert_eq!(output.matches("Product not found: Ghost").count(), 2);
        assert_eq!(output.matches("PRODUCT MENU").count(), 3);
    }

    #[test]
    fn test_remove_by_name() {
        let store = Store::new();
        store.products().add(Product::new("Soda", 1.0).unwrap());
        store.products().add(Product::new("Chips", 2.0).unwrap());

        let output = run(&store, &TillConfig::default(), "3\n\nSoda\n0\n");

        assert!(output.contains("Please enter the name correctly."));
        assert!(output.contains("Product removed successfully!"));
        assert!(store.products().find_by_name("Soda").is_none());
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_update_price() {
        let store = Store::new();
        store.products().add(Product::new("Soda", 1.0).unwrap());

        let output = run(&store, &TillConfig::default(), "4\nSoda\n-2\n1.75\n0\n");

        assert!(output.contains("Current price: $1.00"));
        assert!(output.contains("price must be positive. Try again."));
        assert!(output.contains("Price updated successfully!"));
        assert_eq!(store.products().find_by_name("Soda").unwrap().price(), 1.75);
    }

    #[test]
    fn test_list_empty_and_json() {
        let store = Store::new();
        let output = run(&store, &TillConfig::default(), "1\n0\n");
        assert!(output.contains("No products registered."));

        store.products().add(Product::new("Soda", 1.0).unwrap());
        let config = TillConfig {
            output: OutputFormat::Json,
            ..TillConfig::default()
        };
        let output = run(&store, &config, "1\n0\n");
        let line = output
            .lines()
            .find(|line| line.starts_with('{'))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(json["name"], "Soda");
    }

    #[test]
    fn test_json_listing_puts_each_product_on_its_own_line() {
        let store = Store::new();
        store.products().add(Product::new("Soda", 1.0).unwrap());
        store.products().add(Product::new("Chips", 2.5).unwrap());
        let config = TillConfig {
            output: OutputFormat::Json,
            ..TillConfig::default()
        };

        let output = run(&store, &config, "1\n0\n");

        assert!(output.contains("ENTER YOUR OPTION: \n{"));
        let names: Vec<String> = output
            .lines()
            .filter(|line| line.starts_with('{'))
            .map(|line| {
                let json: serde_json::Value = serde_json::from_str(line).unwrap();
                json["name"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(names, vec!["Soda", "Chips"]);
    }
}
