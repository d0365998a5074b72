//! High-level async facade over the catalog and the snapshot store.
//!
//! [`Guide`] is the entry point an embedding uses: it resolves recipes
//! (built-in catalog plus imported ones), normalizes and stores imported
//! content, and reads/writes progress snapshots. Database work runs on
//! the blocking thread pool; the progression engine itself never touches
//! I/O.

use std::path::PathBuf;

use tokio::task;

use crate::content::{self, normalize::ImportedRecipe};
use crate::error::{GuideError, Result};
use crate::models::{ProgressSnapshot, Recipe, RecipeContent};
use crate::store::Database;

pub mod builder;

pub use builder::GuideBuilder;

/// Main guide interface for recipes and progress snapshots.
pub struct Guide {
    pub(crate) db_path: PathBuf,
}

impl Guide {
    /// Creates a new guide with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    fn join_error(error: task::JoinError) -> GuideError {
        GuideError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// All recipes: the built-in catalog followed by imported ones.
    pub async fn recipes(&self) -> Result<Vec<Recipe>> {
        let db_path = self.db_path.clone();
        let custom = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_custom_recipes()
        })
        .await
        .map_err(Self::join_error)??;

        let mut recipes = content::catalog();
        recipes.extend(custom.into_iter().map(|imported| imported.recipe));
        Ok(recipes)
    }

    /// Recipe metadata by id.
    pub async fn recipe(&self, id: &str) -> Result<Recipe> {
        self.recipes()
            .await?
            .into_iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| GuideError::RecipeNotFound { id: id.to_string() })
    }

    /// Recipe content by id, from the catalog or the imported set.
    pub async fn recipe_content(&self, id: &str) -> Result<RecipeContent> {
        if let Some(found) = content::content_for(id) {
            return Ok(found);
        }

        let db_path = self.db_path.clone();
        let id_owned = id.to_string();
        let imported = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_custom_recipe(&id_owned)
        })
        .await
        .map_err(Self::join_error)??;

        imported
            .map(|imported| imported.content)
            .ok_or_else(|| GuideError::RecipeNotFound { id: id.to_string() })
    }

    /// Normalizes a generated recipe document and stores it. Returns the
    /// normalized recipe; unusable content surfaces as
    /// [`GuideError::UnusableContent`].
    pub async fn import_recipe(&self, document: serde_json::Value) -> Result<ImportedRecipe> {
        let imported = content::normalize::normalize_generated(&document)?;

        let db_path = self.db_path.clone();
        let to_store = imported.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.upsert_custom_recipe(&to_store)
        })
        .await
        .map_err(Self::join_error)??;

        Ok(imported)
    }

    /// Loads the advisory resume snapshot for a recipe.
    pub async fn load_progress(&self, recipe_id: &str) -> Result<Option<ProgressSnapshot>> {
        let db_path = self.db_path.clone();
        let recipe_id = recipe_id.to_string();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.load_progress(&recipe_id)
        })
        .await
        .map_err(Self::join_error)?
    }

    /// Writes the resume snapshot for a recipe.
    pub async fn save_progress(&self, recipe_id: &str, snapshot: ProgressSnapshot) -> Result<()> {
        let db_path = self.db_path.clone();
        let recipe_id = recipe_id.to_string();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.save_progress(&recipe_id, &snapshot)
        })
        .await
        .map_err(Self::join_error)?
    }

    /// Removes the resume snapshot for a recipe.
    pub async fn clear_progress(&self, recipe_id: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let recipe_id = recipe_id.to_string();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.clear_progress(&recipe_id)
        })
        .await
        .map_err(Self::join_error)?
    }
}
