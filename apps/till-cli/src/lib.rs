//! # Till POS Terminal Application
//!
//! Menu-driven front end over the in-memory catalogs.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       till-cli Structure                                │
//! │                                                                         │
//! │  lib.rs (this file)                                                    │
//! │  ├── run()            - Startup sequence, used by main.rs              │
//! │  └── session()        - One menu session over any reader/writer        │
//! │                                                                         │
//! │  config.rs            - TillConfig (env > till.toml > defaults)        │
//! │  error.rs             - CliError                                       │
//! │  prompt.rs            - Prompt<R, W>, line-oriented input              │
//! │  seed.rs              - Optional demo catalog                          │
//! │  menu/                                                                  │
//! │  ├── mod.rs           - Menu trait, MainMenu                           │
//! │  ├── product.rs       - ProductMenu                                    │
//! │  └── sale.rs          - SaleMenu                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Log output goes to stderr so it never interleaves with the menus on
//! stdout.

pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod seed;

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use till_store::Store;

use config::TillConfig;
use error::{CliError, CliResult};
use menu::{MainMenu, Menu};
use prompt::Prompt;

/// Runs the terminal application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ────────────────────────────────────────────────►│
/// │     • till.toml, then TILL_* overrides                                  │
/// │                                                                         │
/// │  2. Initialize Logging ────────────────────────────────────────────────►│
/// │     • RUST_LOG if set, otherwise config.log_filter                      │
/// │                                                                         │
/// │  3. Open the Store ────────────────────────────────────────────────────►│
/// │     • Process-wide product and sale repositories                        │
/// │     • Demo catalog when seed_demo_catalog is on                         │
/// │                                                                         │
/// │  4. Main Menu on stdin/stdout ─────────────────────────────────────────►│
/// │     • Returns on EXIT or end of input                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> CliResult<()> {
    let (config, ignored) = TillConfig::load()?;

    init_tracing(&config.log_filter);

    for key in ignored {
        warn!(key, "Ignoring invalid environment value");
    }

    info!(store = %config.store_name, "Starting Till POS");

    let store = Store::global();

    if config.seed_demo_catalog {
        let added = seed::seed_demo_catalog(store.products())?;
        info!(added, "Demo catalog loaded");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock());

    session(&store, &config, &mut prompt)
}

/// Shows the main menu until EXIT or end of input.
///
/// End of input is a normal way to leave, not an error.
pub fn session<R: BufRead, W: Write>(
    store: &Store,
    config: &TillConfig,
    prompt: &mut Prompt<R, W>,
) -> CliResult<()> {
    match MainMenu::new(store, config).show(prompt) {
        Err(CliError::InputClosed) => {
            info!("Input closed, shutting down");
            prompt.say("\nProgram finished.")
        }
        other => other,
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_store=trace` - Show trace for the repositories only
/// - Default: `default_filter` (from config)
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
