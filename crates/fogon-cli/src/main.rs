//! Fogon CLI Application
//!
//! Terminal front end for the fogon cooking guide.

mod args;
mod cli;
mod cook;
mod renderer;
mod speech;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use fogon_core::GuideBuilder;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let guide = GuideBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize guide")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(guide, renderer);

    info!("Fogon started");

    match command {
        Some(Commands::Show(show_args)) => cli.show_recipe(show_args).await,
        Some(Commands::Cook(cook_args)) => cli.cook(cook_args).await,
        Some(Commands::Import(import_args)) => cli.import_recipe(import_args).await,
        Some(Commands::Reset(reset_args)) => cli.reset_progress(reset_args).await,
        Some(Commands::Recipes) | None => cli.list_recipes().await,
    }
}
