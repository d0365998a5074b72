//! SQLite persistence for progress snapshots and imported recipes.
//!
//! Snapshots are advisory resume points keyed by recipe id, written on
//! every cursor change and cleared on reset or finish. Imported recipes
//! are stored as their normalized JSON document and rejoin the catalog
//! on load.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::content::normalize::ImportedRecipe;
use crate::error::{DatabaseResultExt, Result};
use crate::models::{CookingCursor, ProgressSnapshot, StepLoopState};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS cooking_progress (
    recipe_id      TEXT PRIMARY KEY,
    step_index     INTEGER NOT NULL,
    sub_step_index INTEGER NOT NULL,
    step_loop      TEXT,
    saved_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS custom_recipes (
    id         TEXT PRIMARY KEY,
    document   TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

const UPSERT_PROGRESS_SQL: &str = "INSERT INTO cooking_progress (recipe_id, step_index, sub_step_index, step_loop, saved_at) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(recipe_id) DO UPDATE SET step_index = ?2, sub_step_index = ?3, step_loop = ?4, saved_at = ?5";
const SELECT_PROGRESS_SQL: &str =
    "SELECT step_index, sub_step_index, step_loop, saved_at FROM cooking_progress WHERE recipe_id = ?1";
const DELETE_PROGRESS_SQL: &str = "DELETE FROM cooking_progress WHERE recipe_id = ?1";
const UPSERT_RECIPE_SQL: &str = "INSERT INTO custom_recipes (id, document, created_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(id) DO UPDATE SET document = ?2";
const SELECT_RECIPE_SQL: &str = "SELECT document FROM custom_recipes WHERE id = ?1";
const LIST_RECIPES_SQL: &str = "SELECT document FROM custom_recipes ORDER BY created_at";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute_batch(SCHEMA_SQL)
            .db_context("Failed to initialize database schema")
    }

    /// Writes or replaces the snapshot for a recipe.
    pub fn save_progress(&self, recipe_id: &str, snapshot: &ProgressSnapshot) -> Result<()> {
        let step_loop = match &snapshot.step_loop {
            Some(state) => Some(serde_json::to_string(state)?),
            None => None,
        };
        self.connection
            .execute(
                UPSERT_PROGRESS_SQL,
                params![
                    recipe_id,
                    snapshot.cursor.step_index as i64,
                    snapshot.cursor.sub_step_index as i64,
                    step_loop,
                    snapshot.saved_at.to_string(),
                ],
            )
            .db_context("Failed to save cooking progress")?;
        Ok(())
    }

    /// Loads the snapshot for a recipe, if one was saved. Snapshots are
    /// advisory: malformed loop or timestamp columns degrade to `None`
    /// and "now" instead of failing the load.
    pub fn load_progress(&self, recipe_id: &str) -> Result<Option<ProgressSnapshot>> {
        self.connection
            .query_row(SELECT_PROGRESS_SQL, params![recipe_id], |row| {
                let step_index: i64 = row.get(0)?;
                let sub_step_index: i64 = row.get(1)?;
                let step_loop: Option<String> = row.get(2)?;
                let saved_at: String = row.get(3)?;
                Ok(ProgressSnapshot {
                    cursor: CookingCursor::new(
                        step_index.max(0) as usize,
                        sub_step_index.max(0) as usize,
                    ),
                    step_loop: step_loop
                        .as_deref()
                        .and_then(|text| serde_json::from_str::<StepLoopState>(text).ok()),
                    saved_at: saved_at.parse::<Timestamp>().unwrap_or_else(|_| Timestamp::now()),
                })
            })
            .optional()
            .db_context("Failed to load cooking progress")
    }

    /// Removes the snapshot for a recipe.
    pub fn clear_progress(&self, recipe_id: &str) -> Result<()> {
        self.connection
            .execute(DELETE_PROGRESS_SQL, params![recipe_id])
            .db_context("Failed to clear cooking progress")?;
        Ok(())
    }

    /// Stores a normalized imported recipe, replacing any previous
    /// version with the same id.
    pub fn upsert_custom_recipe(&self, imported: &ImportedRecipe) -> Result<()> {
        let document = serde_json::to_string(imported)?;
        self.connection
            .execute(
                UPSERT_RECIPE_SQL,
                params![imported.recipe.id, document, Timestamp::now().to_string()],
            )
            .db_context("Failed to store custom recipe")?;
        Ok(())
    }

    /// Loads one imported recipe by id.
    pub fn get_custom_recipe(&self, id: &str) -> Result<Option<ImportedRecipe>> {
        let document: Option<String> = self
            .connection
            .query_row(SELECT_RECIPE_SQL, params![id], |row| row.get(0))
            .optional()
            .db_context("Failed to load custom recipe")?;
        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    /// Loads every imported recipe in insertion order. Rows whose
    /// document no longer deserializes are skipped rather than breaking
    /// the whole listing.
    pub fn list_custom_recipes(&self) -> Result<Vec<ImportedRecipe>> {
        let mut statement = self
            .connection
            .prepare(LIST_RECIPES_SQL)
            .db_context("Failed to prepare custom recipe listing")?;
        let rows = statement
            .query_map([], |row| row.get::<_, String>(0))
            .db_context("Failed to list custom recipes")?;

        let mut recipes = Vec::new();
        for row in rows {
            let document = row.db_context("Failed to read custom recipe row")?;
            if let Ok(imported) = serde_json::from_str::<ImportedRecipe>(&document) {
                recipes.push(imported);
            }
        }
        Ok(recipes)
    }
}
