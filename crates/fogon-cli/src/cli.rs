//! Non-interactive command handlers.
//!
//! Each handler resolves arguments into core parameter types, calls the
//! [`Guide`] facade, and renders the result through the markdown
//! renderer. The interactive cooking loop lives in [`crate::cook`].

use std::collections::HashSet;

use anyhow::{anyhow, Context, Result};
use fogon_core::display::{IngredientTable, RecipeList, Roadmap};
use fogon_core::{derive, portions, text, AmountUnit, Guide, ProduceSize, QuantityIntent};

use crate::args::{CookArgs, ImportArgs, QuantityArgs, ResetArgs, ShowArgs};
use crate::renderer::TerminalRenderer;

pub struct Cli {
    guide: Guide,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(guide: Guide, renderer: TerminalRenderer) -> Self {
        Self { guide, renderer }
    }

    /// Lists the catalog plus imported recipes.
    pub async fn list_recipes(&self) -> Result<()> {
        let recipes = self.guide.recipes().await?;
        self.renderer.render(&RecipeList(recipes).to_string())
    }

    /// Shows ingredients and the derived roadmap for the given quantity.
    pub async fn show_recipe(&self, args: ShowArgs) -> Result<()> {
        let recipe = self.guide.recipe(&args.recipe_id).await?;
        let content = self.guide.recipe_content(&args.recipe_id).await?;
        let intent = build_intent(&args.quantity)?;
        let resolution = portions::resolve(&intent, &recipe, &content);
        let plan = derive::derive_cooking_plan(&derive::DeriveOptions {
            recipe: &recipe,
            content: &content,
            deselected: &HashSet::new(),
            intent: &intent,
            resolution: &resolution,
        });

        let mut output = format!(
            "# {} {}\n\n{}\n\n_{}_\n\n",
            recipe.icon, recipe.name, recipe.description, resolution.timing_label
        );
        output.push_str(&IngredientTable {
            content: &content,
            portion: resolution.portion,
        }
        .to_string());

        let batches = batch_count(&recipe, &intent, &plan);
        let tips = portions::batch_usage_tips(&content.ingredients, resolution.portion, batches);
        if !tips.is_empty() {
            output.push_str("\n## Consejos por tanda\n\n");
            for tip in tips {
                output.push_str(&format!("- {tip}\n"));
            }
        }

        output.push('\n');
        output.push_str(
            &Roadmap {
                steps: &plan.steps,
                portion: resolution.portion,
            }
            .to_string(),
        );
        self.renderer.render(&output)
    }

    /// Normalizes and stores a generated recipe document.
    pub async fn import_recipe(&self, args: ImportArgs) -> Result<()> {
        let raw = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let document: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

        let imported = self.guide.import_recipe(document).await?;
        self.renderer.render(&format!(
            "Receta importada: {} **{}** (`{}`), {} pasos.\n",
            imported.recipe.icon,
            imported.recipe.name,
            imported.recipe.id,
            imported.content.steps.len()
        ))
    }

    /// Removes saved progress for a recipe.
    pub async fn reset_progress(&self, args: ResetArgs) -> Result<()> {
        self.guide.clear_progress(&args.recipe_id).await?;
        self.renderer
            .render(&format!("Progreso de `{}` borrado.\n", args.recipe_id))
    }

    /// Runs the interactive cooking loop.
    pub async fn cook(&self, args: CookArgs) -> Result<()> {
        crate::cook::run(&self.guide, &self.renderer, args).await
    }
}

/// Resolves the quantity flags into a core intent. People mode is the
/// default (2 people), matching recipe setup.
pub fn build_intent(args: &QuantityArgs) -> Result<QuantityIntent> {
    let produce_size: ProduceSize = args
        .produce_size
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let intent = if let Some(amount) = args.amount {
        let unit: AmountUnit = args.unit.parse().map_err(|e: String| anyhow!(e))?;
        QuantityIntent::for_amount(amount, unit)
    } else {
        QuantityIntent::for_people(args.people.unwrap_or(2))
    };

    Ok(intent.with_produce(args.produce_type.clone(), produce_size))
}

/// Number of batches this cook runs: the unit count for unit-flow
/// recipes, the loop total otherwise.
pub fn batch_count(
    recipe: &fogon_core::Recipe,
    intent: &QuantityIntent,
    plan: &fogon_core::CookingPlan,
) -> u32 {
    if recipe.unit_flow {
        portions::unit_equivalent(intent.quantity, derive::unit_flow::UNIT_GRAMS).clamp(1, 8)
    } else {
        plan.step_loop.map(|state| state.total_items).unwrap_or(1)
    }
}

/// Ingredient keys for the `--without` exclusions.
pub fn deselection_set(without: &[String]) -> HashSet<String> {
    without.iter().map(|name| text::ingredient_key(name)).collect()
}
