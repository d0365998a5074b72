//! Per-unit step synthesis for unit-flow recipes.
//!
//! Recipes whose canonical shape is "N identical units processed one at
//! a time" (frying eggs) replace their static step list with a generated
//! sequence: the content's prep steps, one fry step per unit, then the
//! content's closing step.

use crate::models::{FireLevel, PortionValues, RecipeContent, RecipeStep, SubStep, SubStepValues};
use crate::text::normalize_text;

/// Grams per egg, used to turn a grams intent into a unit count.
pub const UNIT_GRAMS: f64 = 55.0;

/// Builds the per-unit step sequence. `unit_count` is expected to be
/// pre-clamped to 1..=8.
pub fn build_unit_steps(content: &RecipeContent, unit_count: u32) -> Vec<RecipeStep> {
    let unit_count = unit_count.clamp(1, 8);
    let initial_oil = if unit_count >= 4 { "2 cdas" } else { "1 cda" };

    // First two content steps are the shared prep (preheat pan, heat
    // oil); the oil quantity is rewritten to a batch-wide amount.
    let mut steps: Vec<RecipeStep> = content
        .steps
        .iter()
        .take(2)
        .enumerate()
        .map(|(index, step)| {
            let mut step = step.clone();
            if index == 1 {
                for sub in &mut step.sub_steps {
                    if normalize_text(&sub.name).contains("agregar aceite") {
                        sub.notes = "Usa aceite inicial para cocinar varias tandas. Luego solo \
                                     corrige si hace falta."
                            .to_string();
                        sub.values = SubStepValues::Text(PortionValues::uniform(
                            initial_oil.to_string(),
                        ));
                    }
                }
            }
            step
        })
        .collect();

    let prep_len = steps.len() as u32;
    for unit in 1..=unit_count {
        steps.push(build_fry_step(prep_len + unit, unit, unit_count));
    }

    // Closing step comes from the content so its wording stays with the
    // recipe rather than the generator.
    if let Some(last) = content.steps.last() {
        let mut closing = last.clone();
        closing.step_number = prep_len + unit_count + 1;
        steps.push(closing);
    }

    steps
}

fn build_fry_step(step_number: u32, unit: u32, unit_count: u32) -> RecipeStep {
    let mut sub_steps = Vec::new();

    // The first unit cooks in the oil that was just heated; later units
    // start by checking whether the pan needs a top-up.
    if unit > 1 {
        sub_steps.push(SubStep::action(
            "Revisar aceite para la siguiente tanda",
            "Si la sartén está seca, agrega 1/2 cda. Si aún hay aceite, continúa.",
        ));
    }

    let insert_name = if unit == 1 {
        "Incorporar el primer huevo".to_string()
    } else {
        format!("Incorporar huevo {unit}")
    };
    sub_steps.push(SubStep::action(&insert_name, "Rompe el huevo con cuidado."));

    sub_steps.push(SubStep::timer(
        "Dorar el primer lado",
        "Cocina por el primer lado. El recordatorio indicará cuándo girar.",
        [10, 10, 10],
    ));
    sub_steps.push(SubStep::timer(
        "Voltear y dorar el reverso",
        "Después del giro, termina la cocción del lado B.",
        [10, 10, 10],
    ));

    let retire_notes = if unit < unit_count {
        "Lleva al plato y prepárate para el siguiente."
    } else {
        "Lleva al plato para servir."
    };
    sub_steps.push(SubStep::action(&format!("Retirar huevo {unit}"), retire_notes));

    RecipeStep::new(step_number, &format!("Freír huevo {unit}"), FireLevel::Medium)
        .with_sub_steps(sub_steps)
}

/// Drops a leftover "add egg 2" sub-step from the second fry step when
/// it duplicates the incorporate instruction, so the user is never told
/// to add the same egg twice. A step is left untouched rather than
/// emptied.
pub fn remove_redundant_unit_insert(steps: Vec<RecipeStep>) -> Vec<RecipeStep> {
    steps
        .into_iter()
        .map(|mut step| {
            if !normalize_text(&step.step_name).contains("freir huevo 2") {
                return step;
            }
            let kept: Vec<SubStep> = step
                .sub_steps
                .iter()
                .filter(|sub| !normalize_text(&sub.name).contains("agregar huevo 2"))
                .cloned()
                .collect();
            if !kept.is_empty() {
                step.sub_steps = kept;
            }
            step
        })
        .collect()
}
