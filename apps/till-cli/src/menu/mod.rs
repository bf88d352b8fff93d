//! # Menus
//!
//! Numbered text menus over a [`Prompt`].
//!
//! ## Navigation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu Tree                                       │
//! │                                                                         │
//! │  MAIN MENU                                                              │
//! │   ├── 0 EXIT                                                            │
//! │   ├── 1 PRODUCTS ──► PRODUCT MENU                                       │
//! │   │                   0 BACK  1 LIST  2 ADD  3 REMOVE  4 UPDATE PRICE   │
//! │   └── 2 SALES ─────► SALE MENU                                          │
//! │                       0 BACK  1 LIST  2 NEW SALE  3 REMOVE              │
//! │                                                                         │
//! │  Every menu runs the same loop (Menu::show): print title and options,  │
//! │  read a number, dispatch to execute(). Option 0 returns Flow::Back.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
pub mod sale;

use std::io::{BufRead, Write};

use till_store::Store;

use crate::config::TillConfig;
use crate::error::{CliError, CliResult};
use crate::prompt::Prompt;

pub use product::ProductMenu;
pub use sale::SaleMenu;

pub const INVALID_OPTION: &str = "INVALID OPTION";

/// What a menu does after running an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Back,
}

/// A numbered menu.
///
/// Implementors supply the title, the option labels (index = option number)
/// and the dispatch. The display loop is shared.
pub trait Menu {
    fn title(&self) -> &'static str;

    fn options(&self) -> &'static [&'static str];

    /// Runs one option. Only called with an index into `options()`.
    fn execute<R: BufRead, W: Write>(
        &self,
        option: usize,
        prompt: &mut Prompt<R, W>,
    ) -> CliResult<Flow>;

    /// Shows the menu until an option returns `Flow::Back`.
    ///
    /// `CliError::Core` and `CliError::Validation` from an option are shown
    /// to the user and the menu is redrawn; any other error is returned.
    fn show<R: BufRead, W: Write>(&self, prompt: &mut Prompt<R, W>) -> CliResult<()> {
        loop {
            prompt.say("")?;
            prompt.say(self.title())?;
            for (number, label) in self.options().iter().enumerate() {
                prompt.say(format!("{number} -> {label}"))?;
            }

            let raw = prompt.ask("ENTER YOUR OPTION: ")?;
            let option = match raw.parse::<usize>() {
                Ok(option) if option < self.options().len() => option,
                Ok(_) => {
                    prompt.say(INVALID_OPTION)?;
                    continue;
                }
                Err(_) => {
                    prompt.say("Invalid input. Please enter a number.")?;
                    continue;
                }
            };

            match self.execute(option, prompt) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Back) => return Ok(()),
                // Not-found and rejected values end the option, not the menu.
                Err(CliError::Core(err)) => prompt.say(err)?,
                Err(CliError::Validation(err)) => prompt.say(err)?,
                Err(err) => return Err(err),
            }
        }
    }
}

// =============================================================================
// Main Menu
// =============================================================================

pub struct MainMenu<'a> {
    store: &'a Store,
    config: &'a TillConfig,
}

impl<'a> MainMenu<'a> {
    pub fn new(store: &'a Store, config: &'a TillConfig) -> Self {
        MainMenu { store, config }
    }
}

impl Menu for MainMenu<'_> {
    fn title(&self) -> &'static str {
        "MAIN MENU"
    }

    fn options(&self) -> &'static [&'static str] {
        &["EXIT", "PRODUCTS", "SALES"]
    }

    fn execute<R: BufRead, W: Write>(
        &self,
        option: usize,
        prompt: &mut Prompt<R, W>,
    ) -> CliResult<Flow> {
        match option {
            0 => {
                prompt.say("Program finished.")?;
                return Ok(Flow::Back);
            }
            1 => ProductMenu::new(self.store, self.config).show(prompt)?,
            2 => SaleMenu::new(self.store, self.config).show(prompt)?,
            _ => prompt.say(INVALID_OPTION)?,
        }
        Ok(Flow::Continue)
    }
}
