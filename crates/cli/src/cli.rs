//! Command-line surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use trove_catalog::DEFAULT_SOUND;
use trove_core::ItemId;
use trove_inventory::SortOrder;

use crate::config::DATA_DIR_ENV;

#[derive(Debug, Parser)]
#[command(name = "trove", version, about = "Track purchased items and when to replace them")]
pub struct Cli {
    /// Directory holding the inventory files
    #[arg(long, global = true, value_name = "DIR", env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an item
    Add(AddArgs),
    /// List items with their date status
    List(ListArgs),
    /// Show every field of one item
    Show {
        id: ItemId,
    },
    /// Change fields of an existing item
    Edit(EditArgs),
    /// Delete an item
    Remove {
        id: ItemId,
    },
    /// List the available categories
    Categories,
    /// Manage custom categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// List notification sounds
    Sounds,
    /// Write the whole inventory to a backup file
    Export {
        /// Destination file; `-` writes to stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace the whole inventory with a backup file
    Import {
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Add a custom category
    Add { name: String },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Defaults to today
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub purchase_date: Option<NaiveDate>,

    /// Replacement or expiry date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub target_date: Option<NaiveDate>,

    /// Category id or name; defaults to the first listed category
    #[arg(long)]
    pub category: Option<String>,

    /// Sound id (see `trove sounds`)
    #[arg(long, default_value = DEFAULT_SOUND)]
    pub sound: String,

    /// Image file to attach
    #[arg(long, value_name = "FILE")]
    pub photo: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive match on name or description
    #[arg(long)]
    pub search: Option<String>,

    /// Category id or name
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, default_value = "name_asc")]
    pub sort: SortOrder,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    pub id: ItemId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    pub purchase_date: Option<NaiveDate>,

    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "clear_target")]
    pub target_date: Option<NaiveDate>,

    /// Remove the target date
    #[arg(long)]
    pub clear_target: bool,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub sound: Option<String>,

    #[arg(long, value_name = "FILE", conflicts_with = "clear_photo")]
    pub photo: Option<PathBuf>,

    /// Remove the attached photo
    #[arg(long)]
    pub clear_photo: bool,
}

impl EditArgs {
    /// Edit with no field changes.
    pub fn for_item(id: ItemId) -> Self {
        Self {
            id,
            name: None,
            description: None,
            purchase_date: None,
            target_date: None,
            clear_target: false,
            category: None,
            sound: None,
            photo: None,
            clear_photo: false,
        }
    }
}
