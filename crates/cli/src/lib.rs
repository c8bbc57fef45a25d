//! `trove` command-line front end over a directory-backed store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod photo;
pub mod render;

use anyhow::Context;

use trove_store::FileStore;

pub use cli::{AddArgs, CategoryCommand, Cli, Command, EditArgs, ListArgs};
pub use commands::App;
pub use config::{Config, DATA_DIR_ENV};

/// Resolve configuration, initialize logging, open the data directory and run
/// one command against it, writing results to stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::resolve(cli.data_dir)?;
    trove_observability::init_with(config.log_format);

    let store = FileStore::open(config.data_dir.clone())
        .with_context(|| format!("could not open data directory {}", config.data_dir.display()))?;
    tracing::debug!(data_dir = %config.data_dir.display(), "data directory opened");

    let mut app = App::open(store, trove_inventory::today())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.dispatch(cli.command, &mut out)
}
