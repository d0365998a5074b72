use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Main command-line interface for the Fogon cooking guide
///
/// Fogon walks you through a recipe step by step in the terminal:
/// countdown timers, flip/stir reminders, per-unit loops, and portion
/// scaling, with spoken-style announcements printed as the session
/// advances.
#[derive(Parser)]
#[command(version, about, name = "fogon")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/fogon/fogon.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Fogon CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List available recipes
    #[command(alias = "ls")]
    Recipes,
    /// Show ingredients and the derived step roadmap for a recipe
    Show(ShowArgs),
    /// Cook a recipe interactively
    Cook(CookArgs),
    /// Import a generated recipe from a JSON file
    Import(ImportArgs),
    /// Clear saved progress for a recipe
    Reset(ResetArgs),
}

/// Quantity flags shared by `show` and `cook`.
#[derive(ClapArgs)]
pub struct QuantityArgs {
    /// Cook for this many people (1-8)
    #[arg(long, conflicts_with = "amount")]
    pub people: Option<u8>,

    /// Cook the amount you have, in the selected unit
    #[arg(long)]
    pub amount: Option<f64>,

    /// Unit for --amount: units or grams
    #[arg(long, default_value = "units", requires = "amount")]
    pub unit: String,

    /// Produce variety for boiled-tuber recipes (blanca, yungay,
    /// huayro, canchan, camote-amarillo, camote-morado)
    #[arg(long)]
    pub produce_type: Option<String>,

    /// Produce size for boiled-tuber recipes: small, medium, large
    #[arg(long, default_value = "medium")]
    pub produce_size: String,
}

#[derive(ClapArgs)]
pub struct ShowArgs {
    /// Recipe id (see `fogon recipes`)
    pub recipe_id: String,

    #[command(flatten)]
    pub quantity: QuantityArgs,
}

#[derive(ClapArgs)]
pub struct CookArgs {
    /// Recipe id (see `fogon recipes`)
    pub recipe_id: String,

    #[command(flatten)]
    pub quantity: QuantityArgs,

    /// Exclude an ingredient (repeatable); indispensable ingredients
    /// cannot be excluded
    #[arg(long = "without")]
    pub without: Vec<String>,

    /// Discard any saved progress and start from the first step
    #[arg(long)]
    pub restart: bool,

    /// Start with voice announcements disabled
    #[arg(long)]
    pub no_voice: bool,
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    /// Path to a JSON document with the generated recipe
    pub file: PathBuf,
}

#[derive(ClapArgs)]
pub struct ResetArgs {
    /// Recipe id whose saved progress should be removed
    pub recipe_id: String,
}
