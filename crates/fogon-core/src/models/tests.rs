use std::str::FromStr;

use super::*;

#[test]
fn test_portion_from_count_buckets() {
    assert_eq!(Portion::from_count(0), Portion::One);
    assert_eq!(Portion::from_count(1), Portion::One);
    assert_eq!(Portion::from_count(2), Portion::Two);
    assert_eq!(Portion::from_count(3), Portion::Two);
    assert_eq!(Portion::from_count(4), Portion::Four);
    assert_eq!(Portion::from_count(12), Portion::Four);
}

#[test]
fn test_portion_from_count_monotonic() {
    let buckets: Vec<u8> = (1..=8).map(|n| Portion::from_count(n).as_u8()).collect();
    for pair in buckets.windows(2) {
        assert!(pair[0] <= pair[1], "bucket decreased: {buckets:?}");
    }
}

#[test]
fn test_portion_parse_and_display() {
    assert_eq!(Portion::from_str("4").unwrap(), Portion::Four);
    assert!(Portion::from_str("3").is_err());
    assert_eq!(Portion::Two.to_string(), "2");
}

#[test]
fn test_portion_serde_as_number() {
    let json = serde_json::to_string(&Portion::Four).unwrap();
    assert_eq!(json, "4");
    let parsed: Portion = serde_json::from_str("1").unwrap();
    assert_eq!(parsed, Portion::One);
    assert!(serde_json::from_str::<Portion>("3").is_err());
}

#[test]
fn test_fire_level_labels() {
    assert_eq!(FireLevel::High.label(Equipment::Stove), "alto");
    assert_eq!(FireLevel::High.label(Equipment::Airfryer), "200°C");
    assert_eq!(FireLevel::Low.label(Equipment::Oven), "140°C");
    assert_eq!(FireLevel::Medium.label(Equipment::Stove), "medio");
}

#[test]
fn test_fire_level_from_str() {
    assert_eq!(FireLevel::from_str("HIGH").unwrap(), FireLevel::High);
    assert!(FireLevel::from_str("scorching").is_err());
}

#[test]
fn test_sub_step_timer_accessors() {
    let sub = SubStep::timer("Precalentando...", "La sartén debe quedar caliente.", [45, 55, 65]);
    assert!(sub.is_timer());
    assert_eq!(sub.timer_seconds(Portion::One), Some(45));
    assert_eq!(sub.timer_seconds(Portion::Four), Some(65));
    assert_eq!(sub.value_text(Portion::Two), "55 s");
}

#[test]
fn test_sub_step_action_uses_continue_sentinel() {
    let sub = SubStep::action("Precalentar sartén", "Fuego medio.");
    assert!(!sub.is_timer());
    assert_eq!(sub.timer_seconds(Portion::One), None);
    assert_eq!(sub.value_text(Portion::One), CONTINUE_SENTINEL);
}

#[test]
fn test_sub_step_roundtrips_through_json() {
    let sub = SubStep::amount("Agregar aceite", "Cantidad:", ["1 cdta", "2 cdtas", "1 cda"]);
    let json = serde_json::to_string(&sub).unwrap();
    let back: SubStep = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sub);
}

#[test]
fn test_recipe_step_first_timer() {
    let step = RecipeStep::new(1, "Cocción", FireLevel::Medium).with_sub_steps(vec![
        SubStep::action("Añadir huevos", "Con cuidado."),
        SubStep::timer("Cocinar huevos", "Yema semidura.", [540, 540, 540]),
    ]);
    assert!(step.has_timer());
    assert_eq!(step.first_timer().unwrap().name, "Cocinar huevos");
}

#[test]
fn test_recipe_step_combined_text() {
    let step = RecipeStep::new(2, "Dorar ajo", FireLevel::Medium)
        .with_sub_steps(vec![SubStep::action("Agregar ajo", "Remueve constantemente.")]);
    let text = step.combined_text();
    assert!(text.contains("Dorar ajo"));
    assert!(text.contains("Remueve constantemente."));
}

#[test]
fn test_ingredient_key() {
    let ingredient = Ingredient::new("Ajo picado", "🧄", false, ["1 cdta", "2 cdtas", "1 cda"]);
    assert_eq!(ingredient.key(), "ajo-picado");
}

#[test]
fn test_portion_labels() {
    let labels = PortionLabels::new("huevo", "huevos");
    assert_eq!(labels.for_portion(Portion::One), "huevo");
    assert_eq!(labels.for_portion(Portion::Two), "huevos");
    assert_eq!(labels.for_portion(Portion::Four), "huevos");
}

#[test]
fn test_quantity_intent_clamps_people() {
    let intent = QuantityIntent::for_people(20);
    assert_eq!(intent.quantity, Quantity::People(8));
    let intent = QuantityIntent::for_people(0);
    assert_eq!(intent.quantity, Quantity::People(1));
}

#[test]
fn test_quantity_intent_rejects_non_finite_amounts() {
    let intent = QuantityIntent::for_amount(f64::NAN, AmountUnit::Grams);
    assert_eq!(
        intent.quantity,
        Quantity::Amount {
            value: 0.0,
            unit: AmountUnit::Grams
        }
    );
}

#[test]
fn test_step_loop_pending() {
    let mut state = StepLoopState::new(1, 3);
    assert!(state.has_pending());
    state.current_item = 3;
    assert!(!state.has_pending());
}

#[test]
fn test_snapshot_roundtrips_through_json() {
    let snapshot = ProgressSnapshot::new(CookingCursor::new(2, 1), Some(StepLoopState::new(2, 3)));
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: ProgressSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
