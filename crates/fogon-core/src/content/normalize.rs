//! Defensive normalization of generated recipe content.
//!
//! Recipe JSON produced by an AI generation path is untrusted: arrays
//! may be missing, timer values may be prose, fire levels may be
//! invented. Everything here coerces instead of failing; the only error
//! is content that stays unusable after coercion (no ingredients or no
//! steps), which surfaces as a generation failure rather than a crash.

use serde_json::Value;

use crate::derive::inject_level_transitions;
use crate::error::{GuideError, Result};
use crate::models::{
    Equipment, FireLevel, Ingredient, PortionLabels, PortionValues, Recipe, RecipeContent,
    RecipeStep, SubStep, SubStepValues, CONTINUE_SENTINEL,
};
use crate::text::{normalize_text, parse_timer_seconds, recipe_slug};

/// Fallback duration when a timer sub-step carries no parseable number.
const TIMER_FALLBACK_SECS: u32 = 60;

/// A normalized generated recipe, ready to join the catalog.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportedRecipe {
    pub recipe: Recipe,
    pub content: RecipeContent,
}

/// Coerces arbitrary generated JSON into the recipe content schema.
pub fn normalize_generated(value: &Value) -> Result<ImportedRecipe> {
    let name = str_field(value, "name").unwrap_or_else(|| "Receta personalizada".to_string());
    let description = str_field(value, "description");
    let equipment = detect_equipment(value, &name, description.as_deref());

    let ingredients = normalize_ingredients(value.get("ingredients"));
    if ingredients.is_empty() {
        return Err(GuideError::UnusableContent {
            reason: "no usable ingredients".to_string(),
        });
    }

    let mut steps = normalize_steps(value.get("steps"));
    steps = reorder_prep_before_heat(steps);
    steps = inject_level_transitions(steps, equipment);
    for step in &mut steps {
        inject_flip_reminders(step);
        equalize_second_side_timer(step);
    }
    steps.retain(|step| !step.step_name.trim().is_empty() && !step.sub_steps.is_empty());
    for (index, step) in steps.iter_mut().enumerate() {
        step.step_number = index as u32 + 1;
    }
    if steps.is_empty() {
        return Err(GuideError::UnusableContent {
            reason: "no usable steps".to_string(),
        });
    }

    let step_count = steps.len();
    let recipe = Recipe {
        id: recipe_slug(&name),
        name: name.clone(),
        icon: str_field(value, "icon")
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| default_icon(equipment).to_string()),
        ingredient: str_field(value, "ingredient")
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| "porciones".to_string()),
        description: description
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("{step_count} pasos")),
        equipment,
        unit_flow: false,
    };

    let content = RecipeContent {
        ingredients,
        steps,
        tip: str_field(value, "tip")
            .filter(|tip| !tip.trim().is_empty())
            .unwrap_or_else(|| default_tip(equipment).to_string()),
        portion_labels: normalize_labels(value.get("portionLabels")),
    };

    Ok(ImportedRecipe { recipe, content })
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

fn detect_equipment(value: &Value, name: &str, description: Option<&str>) -> Equipment {
    if let Some(explicit) = str_field(value, "equipment").and_then(|s| s.parse().ok()) {
        return explicit;
    }
    let context = normalize_text(&format!("{name} {}", description.unwrap_or("")));
    if context.contains("airfryer") || context.contains("freidora de aire") {
        Equipment::Airfryer
    } else if context.contains("horno") {
        Equipment::Oven
    } else {
        Equipment::Stove
    }
}

fn default_icon(equipment: Equipment) -> &'static str {
    match equipment {
        Equipment::Airfryer => "🧺",
        Equipment::Oven => "🔥",
        Equipment::Stove => "🍽️",
    }
}

fn default_tip(equipment: Equipment) -> &'static str {
    match equipment {
        Equipment::Airfryer => "Precalienta la freidora si es necesario.",
        _ => "Ten todos los ingredientes listos antes de empezar.",
    }
}

fn normalize_labels(value: Option<&Value>) -> PortionLabels {
    let singular = value
        .and_then(|v| v.get("singular"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("porción");
    let plural = value
        .and_then(|v| v.get("plural"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("porciones");
    PortionLabels::new(singular, plural)
}

/// Ingredients missing a name or a portions object are dropped; the
/// rest get regional renaming, portion text coercion, and an
/// `indispensable` default from position and the seasoning denylist.
fn normalize_ingredients(value: Option<&Value>) -> Vec<Ingredient> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let name = item.get("name")?.as_str()?.trim();
            if name.is_empty() || item.get("portions").is_none() {
                return None;
            }
            Some((name.to_string(), item))
        })
        .enumerate()
        .map(|(index, (name, item))| {
            let name = regional_ingredient_name(&name);
            let indispensable = item
                .get("indispensable")
                .and_then(Value::as_bool)
                .unwrap_or_else(|| index == 0 || !is_likely_dispensable(&name));
            Ingredient {
                emoji: str_field(item, "emoji").unwrap_or_else(|| "🍽️".to_string()),
                indispensable,
                portions: portion_texts(item.get("portions")),
                name,
            }
        })
        .collect()
}

/// Maps common English produce names to their local Spanish names.
pub fn regional_ingredient_name(name: &str) -> String {
    let value = normalize_text(name);
    if value.contains("bell pepper") || value.contains("pimiento morron") {
        "Pimiento".to_string()
    } else if value.contains("green onion")
        || value.contains("spring onion")
        || value.contains("scallion")
    {
        "Cebolla china".to_string()
    } else if value.contains("cilantro") {
        "Culantro".to_string()
    } else if value.contains("sweet potato") {
        "Camote".to_string()
    } else if value.contains("green peas") {
        "Arvejas".to_string()
    } else if value.contains("potato") {
        "Papa".to_string()
    } else if value.contains("corn") {
        "Choclo".to_string()
    } else {
        name.to_string()
    }
}

/// Seasoning-like names default to dispensable.
pub fn is_likely_dispensable(name: &str) -> bool {
    let normalized = normalize_text(name);
    [
        "sal",
        "pimienta",
        "oregano",
        "perejil",
        "cilantro",
        "romero",
        "tomillo",
        "especia",
        "condimento",
        "aderezo",
        "salsa",
    ]
    .iter()
    .any(|hint| normalized.contains(hint))
}

fn portion_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => CONTINUE_SENTINEL.to_string(),
    }
}

fn portion_texts(portions: Option<&Value>) -> PortionValues<String> {
    PortionValues::new(
        portion_text(portions.and_then(|p| p.get("1"))),
        portion_text(portions.and_then(|p| p.get("2"))),
        portion_text(portions.and_then(|p| p.get("4"))),
    )
}

fn normalize_steps(value: Option<&Value>) -> Vec<RecipeStep> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let name = item.get("stepName")?.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            let sub_steps: Vec<SubStep> = item
                .get("subSteps")
                .and_then(Value::as_array)
                .map(|subs| subs.iter().filter_map(normalize_sub_step).collect())
                .unwrap_or_default();
            if sub_steps.is_empty() {
                return None;
            }

            let fire_level = item
                .get("fireLevel")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or(FireLevel::Medium);
            let mut step = RecipeStep::new(0, name, fire_level).with_sub_steps(sub_steps);
            step.temperature = item
                .get("temperature")
                .and_then(Value::as_f64)
                .filter(|t| t.is_finite() && *t > 0.0)
                .map(|t| t.round() as u32);
            step.equipment = item
                .get("equipment")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok());
            Some(step)
        })
        .collect()
}

fn timer_value(portions: Option<&Value>, key: &str) -> Option<u32> {
    match portions?.get(key)? {
        Value::Number(number) => {
            let seconds = number.as_f64()?;
            (seconds.is_finite() && seconds > 0.0).then(|| seconds.round() as u32)
        }
        Value::String(text) => parse_timer_seconds(text),
        _ => None,
    }
}

fn normalize_sub_step(item: &Value) -> Option<SubStep> {
    let name = item.get("subStepName")?.as_str()?.trim();
    if name.is_empty() || item.get("portions").is_none() {
        return None;
    }
    let notes = str_field(item, "notes").unwrap_or_default();
    let portions = item.get("portions");

    let values = if item.get("isTimer").and_then(Value::as_bool).unwrap_or(false) {
        let one = timer_value(portions, "1");
        let two = timer_value(portions, "2");
        let four = timer_value(portions, "4");
        let fallback = one.or(two).or(four).unwrap_or(TIMER_FALLBACK_SECS);
        SubStepValues::Timer(PortionValues::new(
            one.unwrap_or(fallback),
            two.unwrap_or(fallback),
            four.unwrap_or(fallback),
        ))
    } else {
        SubStepValues::Text(portion_texts(portions))
    };

    Some(SubStep {
        name: name.to_string(),
        notes,
        values,
    })
}

fn is_prep_sub_step(sub: &SubStep) -> bool {
    if sub.is_timer() {
        return false;
    }
    let text = normalize_text(&sub.combined_text());
    [
        "pelar",
        "cortar",
        "picar",
        "lavar",
        "enjuagar",
        "trocear",
        "desinfectar",
        "secar",
    ]
    .iter()
    .any(|kw| text.contains(kw))
}

fn is_heat_sub_step(sub: &SubStep) -> bool {
    let text = normalize_text(&sub.combined_text());
    [
        "precalent",
        "calentar",
        "aceite",
        "sarten",
        "olla",
        "hervir",
        "sofreir",
        "freir",
        "dorar",
    ]
    .iter()
    .any(|kw| text.contains(kw))
}

/// Generated recipes sometimes interleave knife work with cooking.
/// Prep sub-steps found at or after the first heat step migrate to the
/// front, either into the existing first step or a fresh leading one.
fn reorder_prep_before_heat(steps: Vec<RecipeStep>) -> Vec<RecipeStep> {
    let Some(first_heat) = steps
        .iter()
        .position(|step| step.sub_steps.iter().any(is_heat_sub_step))
    else {
        return steps;
    };

    let mut steps = steps;
    let mut moved_prep = Vec::new();
    for step in steps.iter_mut().skip(first_heat) {
        let (prep, keep): (Vec<SubStep>, Vec<SubStep>) =
            step.sub_steps.drain(..).partition(|sub| is_prep_sub_step(sub));
        moved_prep.extend(prep);
        step.sub_steps = keep;
    }

    if moved_prep.is_empty() {
        return steps;
    }

    let first_step_has_heat = steps
        .first()
        .is_some_and(|step| step.sub_steps.iter().any(is_heat_sub_step));
    if first_step_has_heat {
        let prep_step = RecipeStep::new(1, "Preparación previa", FireLevel::Low)
            .with_sub_steps(moved_prep);
        steps.insert(0, prep_step);
    } else if let Some(first) = steps.first_mut() {
        moved_prep.append(&mut first.sub_steps);
        first.sub_steps = moved_prep;
    }

    steps.retain(|step| !step.sub_steps.is_empty());
    steps
}

fn is_first_side_timer(sub: &SubStep) -> bool {
    let text = normalize_text(&sub.combined_text());
    sub.is_timer()
        && (text.contains("primer lado")
            || text.contains("primera cara")
            || text.contains("primer tramo"))
}

fn is_second_side_timer(sub: &SubStep) -> bool {
    let text = normalize_text(&sub.combined_text());
    sub.is_timer()
        && (text.contains("segundo lado")
            || text.contains("segunda cara")
            || text.contains("segundo tramo"))
}

/// Inserts a flip reminder between consecutive first-side/second-side
/// timer pairs so the user gets an explicit action between the two
/// stretches. Pairs that already have a reminder are left alone.
fn inject_flip_reminders(step: &mut RecipeStep) {
    let mut index = 0;
    while index + 1 < step.sub_steps.len() {
        let pair = is_first_side_timer(&step.sub_steps[index])
            && is_second_side_timer(&step.sub_steps[index + 1]);
        if pair {
            let next_text = normalize_text(&step.sub_steps[index + 1].combined_text());
            if !next_text.contains("recordatorio") {
                step.sub_steps.insert(
                    index + 1,
                    SubStep::action(
                        "Recordatorio: mover o voltear",
                        "Haz el giro o movimiento antes de iniciar el siguiente tramo.",
                    ),
                );
                index += 1;
            }
        }
        index += 1;
    }
}

/// Both sides of a flip cook for the same time; the second-side timer
/// copies the first so a generated asymmetry does not confuse the cook.
fn equalize_second_side_timer(step: &mut RecipeStep) {
    let first = step.sub_steps.iter().position(is_first_side_timer);
    let second = step.sub_steps.iter().position(is_second_side_timer);
    if let (Some(first), Some(second)) = (first, second) {
        if second > first {
            if let SubStepValues::Timer(values) = step.sub_steps[first].values.clone() {
                step.sub_steps[second].values = SubStepValues::Timer(values);
            }
        }
    }
}
