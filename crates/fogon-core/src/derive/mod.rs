//! Recipe step derivation.
//!
//! Turns a recipe's raw step list into the effective step list the
//! progression engine walks. Applied in order:
//!
//! 1. unit-flow synthesis (recipes shaped as N identical units)
//! 2. ingredient-based pruning of deselected ingredients
//! 3. fire-level/equipment transition injection
//! 4. redundant-sub-step removal for unit flows
//! 5. timer scaling by the continuous scale factor
//!
//! plus loop detection and continuous-timer marking. Recipe content may
//! come from an untrusted generation path, so every input is clamped or
//! defaulted; nothing here returns an error.

use std::collections::HashSet;

use crate::cues;
use crate::models::{
    Equipment, Ingredient, Portion, QuantityIntent, Recipe, RecipeContent, RecipeStep, StepLoopState,
    SubStep,
};
use crate::portions::{self, PortionResolution};
use crate::text::{has_explicit_unit_numbering, normalize_text, parse_unit_count};

pub mod unit_flow;


/// Scale factors closer to 1 than this leave timers untouched.
pub const SCALE_EPSILON: f64 = 0.01;

/// A step whose single timer runs at least this long (bucket 1) is
/// treated as one continuous timer spanning all of its sub-steps.
pub const CONTINUOUS_TIMER_MIN_SECS: u32 = 600;

/// The effective step list plus the loop anchor, ready for a
/// [`crate::session::CookingSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct CookingPlan {
    pub steps: Vec<RecipeStep>,
    pub step_loop: Option<StepLoopState>,
}

/// Inputs to the derivation pipeline.
pub struct DeriveOptions<'a> {
    pub recipe: &'a Recipe,
    pub content: &'a RecipeContent,
    /// Ingredient keys the user deselected during setup
    pub deselected: &'a HashSet<String>,
    pub intent: &'a QuantityIntent,
    pub resolution: &'a PortionResolution,
}

/// Derives the effective step list for one cooking session.
pub fn derive_cooking_plan(options: &DeriveOptions<'_>) -> CookingPlan {
    let DeriveOptions {
        recipe,
        content,
        deselected,
        intent,
        resolution,
    } = options;

    let mut steps = if recipe.unit_flow {
        let unit_count =
            portions::unit_equivalent(intent.quantity, unit_flow::UNIT_GRAMS).clamp(1, 8);
        unit_flow::build_unit_steps(content, unit_count)
    } else {
        content.steps.clone()
    };

    steps = prune_deselected(steps, &content.ingredients, deselected);
    steps = inject_level_transitions(steps, recipe.equipment);
    if recipe.unit_flow {
        steps = unit_flow::remove_redundant_unit_insert(steps);
    }
    steps = scale_timers(steps, resolution.scale_factor);
    renumber(&mut steps);
    mark_continuous_timers(&mut steps);

    let step_loop = detect_loop(recipe, content, &steps, resolution.portion);

    CookingPlan { steps, step_loop }
}

/// Removes sub-steps that mention a deselected, non-indispensable
/// ingredient so the guide never instructs the user to use something
/// they excluded. Steps left empty are dropped and the rest renumbered.
/// If pruning would empty the whole list, the unpruned list is returned:
/// a recipe must never disappear.
pub fn prune_deselected(
    steps: Vec<RecipeStep>,
    ingredients: &[Ingredient],
    deselected: &HashSet<String>,
) -> Vec<RecipeStep> {
    let terms: Vec<String> = ingredients
        .iter()
        .filter(|ingredient| !ingredient.indispensable && deselected.contains(&ingredient.key()))
        .map(|ingredient| normalize_text(&ingredient.name))
        .filter(|term| term.len() >= 3)
        .collect();

    if terms.is_empty() {
        return steps;
    }

    let mut pruned: Vec<RecipeStep> = steps
        .iter()
        .map(|step| {
            let sub_steps: Vec<SubStep> = step
                .sub_steps
                .iter()
                .filter(|sub| {
                    let haystack = normalize_text(&sub.combined_text());
                    !terms.iter().any(|term| haystack.contains(term.as_str()))
                })
                .cloned()
                .collect();
            RecipeStep {
                sub_steps,
                ..step.clone()
            }
        })
        .filter(|step| !step.sub_steps.is_empty())
        .collect();

    if pruned.is_empty() {
        return steps;
    }

    renumber(&mut pruned);
    pruned
}

/// Resolves each step's equipment and, whenever the fire level or
/// equipment changes from the preceding step, prepends an instruction to
/// adjust the heat, unless the step already declares one.
pub fn inject_level_transitions(
    steps: Vec<RecipeStep>,
    recipe_equipment: Equipment,
) -> Vec<RecipeStep> {
    let resolved: Vec<Equipment> = steps
        .iter()
        .map(|step| step.equipment.unwrap_or(recipe_equipment))
        .collect();
    let levels: Vec<_> = steps.iter().map(|step| step.fire_level).collect();

    steps
        .into_iter()
        .enumerate()
        .map(|(index, mut step)| {
            let equipment = resolved[index];
            step.equipment = Some(equipment);
            if index == 0 {
                return step;
            }

            let previous_equipment = resolved[index - 1];
            let previous_level = levels[index - 1];
            let level = step.fire_level;
            if previous_level == level && previous_equipment == equipment {
                return step;
            }
            if step.sub_steps.iter().any(cues::declares_level_adjustment) {
                return step;
            }

            let target = level.label(equipment);
            let transition = match equipment {
                Equipment::Airfryer => SubStep::action(
                    &format!("Ajustar temperatura a {target}"),
                    &format!("Ajusta la freidora de aire a {target}."),
                ),
                Equipment::Oven => SubStep::action(
                    &format!("Ajustar temperatura a {target}"),
                    &format!(
                        "Ajusta de {} a {target} para este paso.",
                        previous_level.label(previous_equipment)
                    ),
                ),
                Equipment::Stove => {
                    let action = if level < previous_level {
                        "Bajar fuego"
                    } else {
                        "Subir fuego"
                    };
                    SubStep::action(
                        &format!("{action} a {target}"),
                        &format!(
                            "Ajusta de {} a {target} para este paso.",
                            previous_level.label(previous_equipment)
                        ),
                    )
                }
            };

            step.sub_steps.insert(0, transition);
            step
        })
        .collect()
}

fn scale_timers(steps: Vec<RecipeStep>, factor: f64) -> Vec<RecipeStep> {
    if (factor - 1.0).abs() < SCALE_EPSILON {
        return steps;
    }

    steps
        .into_iter()
        .map(|mut step| {
            for sub in &mut step.sub_steps {
                if let crate::models::SubStepValues::Timer(values) = &mut sub.values {
                    *values = values.map(|secs| {
                        let scaled = (f64::from(*secs) * factor).round();
                        (scaled.max(1.0)) as u32
                    });
                }
            }
            step
        })
        .collect()
}

fn renumber(steps: &mut [RecipeStep]) {
    for (index, step) in steps.iter_mut().enumerate() {
        step.step_number = index as u32 + 1;
    }
}

fn mark_continuous_timers(steps: &mut [RecipeStep]) {
    for step in steps.iter_mut() {
        let timer_count = step.sub_steps.iter().filter(|sub| sub.is_timer()).count();
        step.continuous_timer = step.sub_steps.len() >= 2
            && timer_count == 1
            && step
                .first_timer()
                .and_then(|sub| sub.timer_seconds(Portion::One))
                .is_some_and(|secs| secs >= CONTINUOUS_TIMER_MIN_SECS);
    }
}

/// Determines whether this plan repeats one step per unit. Unit-flow
/// recipes and plans that already spell out per-unit numbering express
/// repetition structurally and never get a loop cursor.
fn detect_loop(
    recipe: &Recipe,
    content: &RecipeContent,
    steps: &[RecipeStep],
    portion: Portion,
) -> Option<StepLoopState> {
    if recipe.unit_flow {
        return None;
    }
    let combined: String = steps
        .iter()
        .map(RecipeStep::combined_text)
        .collect::<Vec<_>>()
        .join(" ");
    if has_explicit_unit_numbering(&normalize_text(&combined)) {
        return None;
    }

    let total = loop_item_count(&content.ingredients, portion);
    if total <= 1 {
        return None;
    }

    steps
        .iter()
        .position(cues::is_loopable_step)
        .map(|index| StepLoopState::new(index, total))
}

/// Loop total: the first indispensable ingredient whose portion text
/// parses to a whole unit count in 2..=12; 1 (no loop) otherwise.
pub fn loop_item_count(ingredients: &[Ingredient], portion: Portion) -> u32 {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.indispensable)
        .find_map(|ingredient| parse_unit_count(ingredient.portions.get(portion)))
        .unwrap_or(1)
}
