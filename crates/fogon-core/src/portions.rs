//! Quantity/portion resolution.
//!
//! Maps a [`QuantityIntent`] to the discrete portion bucket used for
//! ingredient lookups plus the continuous factor that stretches or
//! compresses every timer. Pure functions of the intent and recipe
//! metadata; all inputs are clamped, nothing here can fail.

use crate::models::{
    AmountUnit, Ingredient, Portion, ProduceSize, Quantity, QuantityIntent, Recipe, RecipeContent,
};
use crate::text::{normalize_text, parse_first_number};

/// Rough grams-per-unit conversion used when bucketing a weight.
pub const GRAMS_PER_UNIT: f64 = 250.0;

/// Bounds of the final timer scale factor.
pub const SCALE_FACTOR_MIN: f64 = 0.7;
pub const SCALE_FACTOR_MAX: f64 = 2.5;

/// Outcome of resolving a quantity intent for a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct PortionResolution {
    /// Discrete bucket for ingredient quantities and base timer values
    pub portion: Portion,

    /// Continuous multiplier applied to every timer duration
    pub scale_factor: f64,

    /// User-facing timing label ("Tiempo estándar" / "Tiempo ajustado x1.25")
    pub timing_label: String,
}

/// Resolves an intent against a recipe. Deterministic and side-effect
/// free; the produce-type/size modifiers only apply to recipes that
/// read as boiled tubers.
pub fn resolve(intent: &QuantityIntent, recipe: &Recipe, content: &RecipeContent) -> PortionResolution {
    let portion = resolve_bucket(intent.quantity);
    let scale_factor = resolve_scale_factor(intent, is_tuber_boil_recipe(recipe, content));
    let timing_label = timing_label(scale_factor);
    PortionResolution {
        portion,
        scale_factor,
        timing_label,
    }
}

/// Maps a quantity to its portion bucket. Weights convert to a unit
/// count first (250 g per unit, rounded, floor 1).
pub fn resolve_bucket(quantity: Quantity) -> Portion {
    Portion::from_count(unit_equivalent(quantity, GRAMS_PER_UNIT))
}

/// Whole-unit equivalent of a quantity, floor 1, using the given
/// grams-per-unit conversion for weights.
pub fn unit_equivalent(quantity: Quantity, grams_per_unit: f64) -> u32 {
    match quantity {
        Quantity::People(count) => u32::from(count.max(1)),
        Quantity::Amount { value, unit } => {
            let units = match unit {
                AmountUnit::Units => value,
                AmountUnit::Grams => value / grams_per_unit,
            };
            (units.round().max(1.0)) as u32
        }
    }
}

/// Continuous timer scale factor, clamped to
/// [[`SCALE_FACTOR_MIN`], [`SCALE_FACTOR_MAX`]].
pub fn resolve_scale_factor(intent: &QuantityIntent, tuber_boil: bool) -> f64 {
    let mut factor = match intent.quantity {
        Quantity::People(count) => (f64::from(count) / 2.0).clamp(0.8, 2.0),
        Quantity::Amount {
            value,
            unit: AmountUnit::Grams,
        } => (value / 500.0).clamp(0.7, 2.2),
        Quantity::Amount {
            value,
            unit: AmountUnit::Units,
        } => (value / 2.0).clamp(0.7, 2.2),
    };

    if tuber_boil {
        factor *= produce_type_factor(intent.produce_type.as_deref());
        factor *= produce_size_factor(intent.produce_size);
    }

    factor.clamp(SCALE_FACTOR_MIN, SCALE_FACTOR_MAX)
}

/// A recipe counts as a boiled-tuber recipe when its name/ingredient
/// text mentions potatoes or sweet potatoes together with boiling
/// vocabulary.
pub fn is_tuber_boil_recipe(recipe: &Recipe, content: &RecipeContent) -> bool {
    let mut context = format!("{} {}", recipe.name, recipe.ingredient);
    for ingredient in &content.ingredients {
        context.push(' ');
        context.push_str(&ingredient.name);
    }
    let context = normalize_text(&context);
    (context.contains("papa") || context.contains("camote"))
        && (context.contains("sancoch") || context.contains("herv"))
}

fn produce_type_factor(produce_type: Option<&str>) -> f64 {
    let Some(name) = produce_type else { return 1.0 };
    match crate::text::ingredient_key(name).as_str() {
        "blanca" => 1.0,
        "yungay" => 1.05,
        "huayro" => 1.12,
        "canchan" => 1.08,
        "camote-amarillo" => 0.95,
        "camote-morado" => 1.08,
        _ => 1.0,
    }
}

fn produce_size_factor(size: ProduceSize) -> f64 {
    match size {
        ProduceSize::Small => 0.85,
        ProduceSize::Medium => 1.0,
        ProduceSize::Large => 1.2,
    }
}

/// User-facing timing label for a scale factor.
pub fn timing_label(factor: f64) -> String {
    if (factor - 1.0).abs() < 0.01 {
        "Tiempo estándar".to_string()
    } else {
        format!("Tiempo ajustado x{factor:.2}")
    }
}

/// Converts an entered amount between units and grams, snapping grams to
/// 50 g increments and clamping both directions to sensible ranges.
pub fn convert_amount(value: f64, from: AmountUnit, to: AmountUnit) -> f64 {
    match (from, to) {
        (AmountUnit::Units, AmountUnit::Grams) => {
            let grams = (value * GRAMS_PER_UNIT / 50.0).round() * 50.0;
            grams.clamp(50.0, 5000.0)
        }
        (AmountUnit::Grams, AmountUnit::Units) => {
            let units = (value / GRAMS_PER_UNIT).round().max(1.0);
            units.clamp(1.0, 20.0)
        }
        _ => value,
    }
}

/// Per-batch usage tips for fat ingredients when cooking in batches, so
/// the user does not pour everything into the first round.
pub fn batch_usage_tips(ingredients: &[Ingredient], portion: Portion, batches: u32) -> Vec<String> {
    if batches <= 1 {
        return Vec::new();
    }

    let mut tips = Vec::new();
    for ingredient in ingredients {
        let name = normalize_text(&ingredient.name);
        if !name.contains("aceite") && !name.contains("mantequilla") {
            continue;
        }

        let raw = ingredient.portions.get(portion);
        let Some(total) = parse_first_number(raw) else {
            continue;
        };

        let unit = if raw.contains("cucharadita") {
            "cucharadita"
        } else if raw.contains("cdta") {
            "cdta"
        } else if raw.contains("cucharada") {
            "cucharada"
        } else if raw.contains("cda") {
            "cda"
        } else {
            "porción"
        };

        // Quarter-spoon resolution, never below a quarter.
        let per_batch = ((total / f64::from(batches)) * 4.0).round() / 4.0;
        let per_batch = per_batch.max(0.25);
        let plural = if (per_batch - 1.0).abs() < f64::EPSILON { "" } else { "s" };
        tips.push(format!(
            "{}: usa aprox. {} {unit}{plural} por tanda (no todo al inicio).",
            ingredient.name,
            format_quantity(per_batch),
        ));
    }
    tips
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PortionLabels, QuantityIntent};

    fn tuber_recipe() -> (Recipe, RecipeContent) {
        let recipe = Recipe {
            id: "papa-sancochada".to_string(),
            name: "Papa sancochada".to_string(),
            icon: "🥔".to_string(),
            ingredient: "Papas".to_string(),
            description: "Hervido simple".to_string(),
            equipment: Default::default(),
            unit_flow: false,
        };
        let content = RecipeContent {
            ingredients: vec![Ingredient::new(
                "Papas",
                "🥔",
                true,
                ["1 papa", "2 papas", "4 papas"],
            )],
            steps: Vec::new(),
            tip: String::new(),
            portion_labels: PortionLabels::new("papa", "papas"),
        };
        (recipe, content)
    }

    #[test]
    fn test_bucket_monotonic_over_people_counts() {
        let mut last = 0;
        for count in 1..=8 {
            let bucket = resolve_bucket(Quantity::People(count)).as_u8();
            assert!(bucket >= last);
            assert!([1, 2, 4].contains(&bucket));
            last = bucket;
        }
    }

    #[test]
    fn test_bucket_from_grams_divides_first() {
        // 700 g -> 3 units -> bucket 2.
        let quantity = Quantity::Amount {
            value: 700.0,
            unit: AmountUnit::Grams,
        };
        assert_eq!(resolve_bucket(quantity), Portion::Two);
        // 100 g rounds to 0 units but floors to 1.
        let quantity = Quantity::Amount {
            value: 100.0,
            unit: AmountUnit::Grams,
        };
        assert_eq!(resolve_bucket(quantity), Portion::One);
    }

    #[test]
    fn test_scale_factor_people_clamps() {
        let low = QuantityIntent::for_people(1);
        assert!((resolve_scale_factor(&low, false) - 0.8).abs() < 1e-9);
        let high = QuantityIntent::for_people(8);
        assert!((resolve_scale_factor(&high, false) - 2.0).abs() < 1e-9);
        let mid = QuantityIntent::for_people(3);
        assert!((resolve_scale_factor(&mid, false) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_scale_factor_amount_clamps() {
        let grams = QuantityIntent::for_amount(2000.0, AmountUnit::Grams);
        assert!((resolve_scale_factor(&grams, false) - 2.2).abs() < 1e-9);
        let units = QuantityIntent::for_amount(1.0, AmountUnit::Units);
        assert!((resolve_scale_factor(&units, false) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_scale_factor_final_clamp_with_tuber_modifiers() {
        // 8 people (2.0) * huayro (1.12) * large (1.2) would be 2.688.
        let intent = QuantityIntent::for_people(8)
            .with_produce(Some("huayro".to_string()), ProduceSize::Large);
        let factor = resolve_scale_factor(&intent, true);
        assert!((factor - SCALE_FACTOR_MAX).abs() < 1e-9);
    }

    #[test]
    fn test_scale_factor_always_within_bounds() {
        for count in 1..=8u8 {
            for (produce, size) in [
                (None, ProduceSize::Small),
                (Some("camote-amarillo".to_string()), ProduceSize::Small),
                (Some("huayro".to_string()), ProduceSize::Large),
            ] {
                let intent = QuantityIntent::for_people(count).with_produce(produce, size);
                for tuber in [false, true] {
                    let factor = resolve_scale_factor(&intent, tuber);
                    assert!((SCALE_FACTOR_MIN..=SCALE_FACTOR_MAX).contains(&factor));
                }
            }
        }
    }

    #[test]
    fn test_tuber_boil_detection() {
        let (recipe, content) = tuber_recipe();
        assert!(is_tuber_boil_recipe(&recipe, &content));

        let mut fried = recipe.clone();
        fried.name = "Papas fritas".to_string();
        fried.description = "Fritura".to_string();
        // "Papas fritas" has no boil vocabulary anywhere.
        let fried_content = RecipeContent {
            ingredients: vec![Ingredient::new("Papas", "🥔", true, ["1", "2", "4"])],
            ..content
        };
        assert!(!is_tuber_boil_recipe(&fried, &fried_content));
    }

    #[test]
    fn test_resolve_builds_label() {
        let (recipe, content) = tuber_recipe();
        let resolution = resolve(&QuantityIntent::for_people(2), &recipe, &content);
        assert_eq!(resolution.portion, Portion::Two);
        assert_eq!(resolution.timing_label, "Tiempo estándar");

        let resolution = resolve(&QuantityIntent::for_people(3), &recipe, &content);
        assert_eq!(resolution.timing_label, "Tiempo ajustado x1.50");
    }

    #[test]
    fn test_unit_equivalent_for_eggs() {
        let grams = Quantity::Amount {
            value: 170.0,
            unit: AmountUnit::Grams,
        };
        assert_eq!(unit_equivalent(grams, 55.0), 3);
        let people = Quantity::People(4);
        assert_eq!(unit_equivalent(people, 55.0), 4);
    }

    #[test]
    fn test_convert_amount() {
        assert_eq!(convert_amount(2.0, AmountUnit::Units, AmountUnit::Grams), 500.0);
        assert_eq!(convert_amount(40.0, AmountUnit::Units, AmountUnit::Grams), 5000.0);
        assert_eq!(convert_amount(700.0, AmountUnit::Grams, AmountUnit::Units), 3.0);
        assert_eq!(convert_amount(10.0, AmountUnit::Grams, AmountUnit::Units), 1.0);
        assert_eq!(convert_amount(3.0, AmountUnit::Units, AmountUnit::Units), 3.0);
    }

    #[test]
    fn test_batch_usage_tips() {
        let ingredients = vec![
            Ingredient::new("Aceite", "🫒", true, ["2 cdas", "4 cdas", "8 cdas"]),
            Ingredient::new("Papas", "🥔", true, ["1 papa", "2 papas", "4 papas"]),
        ];
        let tips = batch_usage_tips(&ingredients, Portion::Four, 3);
        assert_eq!(tips.len(), 1);
        assert!(tips[0].starts_with("Aceite: usa aprox. 2.75 cdas por tanda"));

        assert!(batch_usage_tips(&ingredients, Portion::Four, 1).is_empty());
    }
}
