//! Display wrapper types for formatting different contexts.
//!
//! Domain models stay presentation-free; these wrappers format them as
//! markdown for the terminal renderer. The same data renders differently
//! depending on context (a menu line, the ingredient table for a chosen
//! bucket, the full roadmap), so each context gets its own wrapper type
//! instead of a Display impl on the model.

use std::fmt;

use crate::models::{Portion, Recipe, RecipeContent, RecipeStep};

/// Menu listing of recipes.
pub struct RecipeList(pub Vec<Recipe>);

impl fmt::Display for RecipeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No hay recetas disponibles.");
        }
        writeln!(f, "# Recetas")?;
        writeln!(f)?;
        for recipe in &self.0 {
            writeln!(
                f,
                "- {} **{}** (`{}`) — {}",
                recipe.icon, recipe.name, recipe.id, recipe.description
            )?;
        }
        Ok(())
    }
}

/// Ingredient table for one portion bucket.
pub struct IngredientTable<'a> {
    pub content: &'a RecipeContent,
    pub portion: Portion,
}

impl fmt::Display for IngredientTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Ingredientes ({} {})",
            self.portion,
            self.content.portion_labels.for_portion(self.portion)
        )?;
        writeln!(f)?;
        for ingredient in &self.content.ingredients {
            let marker = if ingredient.indispensable {
                ""
            } else {
                " _(opcional)_"
            };
            writeln!(
                f,
                "- {} **{}**: {}{marker}",
                ingredient.emoji,
                ingredient.name,
                ingredient.portions.get(self.portion)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "> {}", self.content.tip)
    }
}

/// Read-only roadmap of an effective step list.
pub struct Roadmap<'a> {
    pub steps: &'a [RecipeStep],
    pub portion: Portion,
}

impl fmt::Display for Roadmap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.steps {
            let equipment = step.equipment.unwrap_or_default();
            writeln!(
                f,
                "## Paso {}: {} — fuego {}",
                step.step_number,
                step.step_name,
                step.fire_level.label(equipment)
            )?;
            for (index, sub) in step.sub_steps.iter().enumerate() {
                let value = sub.value_text(self.portion);
                if sub.is_timer() {
                    writeln!(f, "{index}. ⏱ {} ({value})", sub.name)?;
                } else {
                    writeln!(f, "{index}. {} ({value})", sub.name)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
