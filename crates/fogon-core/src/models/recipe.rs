//! Recipe content schema: steps, sub-steps, and ingredients.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Portion;

/// Sentinel portion text for sub-steps that carry no quantity and are
/// acknowledged with a plain "continue" tap.
pub const CONTINUE_SENTINEL: &str = "Continuar";

/// Cooking equipment a step runs on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    #[default]
    Stove,
    Airfryer,
    Oven,
}

impl FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stove" => Ok(Equipment::Stove),
            "airfryer" => Ok(Equipment::Airfryer),
            "oven" => Ok(Equipment::Oven),
            _ => Err(format!("Invalid equipment: {s}")),
        }
    }
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Stove => "stove",
            Equipment::Airfryer => "airfryer",
            Equipment::Oven => "oven",
        }
    }
}

/// Heat intensity of a step. Unknown values coerce to `Medium` during
/// normalization. Ordered so transitions know whether heat goes up or
/// down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum FireLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for FireLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(FireLevel::Low),
            "medium" => Ok(FireLevel::Medium),
            "high" => Ok(FireLevel::High),
            _ => Err(format!("Invalid fire level: {s}")),
        }
    }
}

impl FireLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FireLevel::Low => "low",
            FireLevel::Medium => "medium",
            FireLevel::High => "high",
        }
    }

    /// User-facing target for this level on the given equipment: a dial
    /// position for the stove, a temperature for airfryer/oven.
    pub fn label(&self, equipment: Equipment) -> &'static str {
        match equipment {
            Equipment::Airfryer | Equipment::Oven => match self {
                FireLevel::Low => "140°C",
                FireLevel::Medium => "180°C",
                FireLevel::High => "200°C",
            },
            Equipment::Stove => match self {
                FireLevel::Low => "bajo",
                FireLevel::Medium => "medio",
                FireLevel::High => "alto",
            },
        }
    }
}

/// One value per portion bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortionValues<T> {
    #[serde(rename = "1")]
    pub one: T,
    #[serde(rename = "2")]
    pub two: T,
    #[serde(rename = "4")]
    pub four: T,
}

impl<T> PortionValues<T> {
    pub fn new(one: T, two: T, four: T) -> Self {
        Self { one, two, four }
    }

    pub fn get(&self, portion: Portion) -> &T {
        match portion {
            Portion::One => &self.one,
            Portion::Two => &self.two,
            Portion::Four => &self.four,
        }
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PortionValues<U> {
        PortionValues {
            one: f(&self.one),
            two: f(&self.two),
            four: f(&self.four),
        }
    }
}

impl<T: Clone> PortionValues<T> {
    /// The same value for every bucket.
    pub fn uniform(value: T) -> Self {
        Self {
            one: value.clone(),
            two: value.clone(),
            four: value,
        }
    }
}

/// Per-bucket payload of a sub-step: countdown seconds for timer
/// sub-steps, free text (an amount or [`CONTINUE_SENTINEL`]) otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SubStepValues {
    Timer(PortionValues<u32>),
    Text(PortionValues<String>),
}

/// An individual instruction within a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubStep {
    /// Short instruction shown as the sub-step title
    pub name: String,

    /// Supporting detail spoken and shown under the title
    pub notes: String,

    /// Per-bucket timer durations or display text
    pub values: SubStepValues,
}

impl SubStep {
    /// Timer sub-step with per-bucket durations in seconds.
    pub fn timer(name: &str, notes: &str, seconds: [u32; 3]) -> Self {
        Self {
            name: name.to_string(),
            notes: notes.to_string(),
            values: SubStepValues::Timer(PortionValues::new(seconds[0], seconds[1], seconds[2])),
        }
    }

    /// Non-timer sub-step acknowledged with a plain continue.
    pub fn action(name: &str, notes: &str) -> Self {
        Self {
            name: name.to_string(),
            notes: notes.to_string(),
            values: SubStepValues::Text(PortionValues::uniform(CONTINUE_SENTINEL.to_string())),
        }
    }

    /// Non-timer sub-step carrying a per-bucket quantity.
    pub fn amount(name: &str, notes: &str, amounts: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            notes: notes.to_string(),
            values: SubStepValues::Text(PortionValues::new(
                amounts[0].to_string(),
                amounts[1].to_string(),
                amounts[2].to_string(),
            )),
        }
    }

    pub fn is_timer(&self) -> bool {
        matches!(self.values, SubStepValues::Timer(_))
    }

    /// Countdown duration for the given bucket, if this is a timer.
    pub fn timer_seconds(&self, portion: Portion) -> Option<u32> {
        match &self.values {
            SubStepValues::Timer(values) => Some(*values.get(portion)),
            SubStepValues::Text(_) => None,
        }
    }

    /// Display text for the given bucket.
    pub fn value_text(&self, portion: Portion) -> String {
        match &self.values {
            SubStepValues::Timer(values) => format!("{} s", values.get(portion)),
            SubStepValues::Text(values) => values.get(portion).clone(),
        }
    }

    /// Title and notes joined, for keyword classification.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.name, self.notes)
    }
}

/// One numbered step of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeStep {
    /// 1-based position, contiguous within a derived list
    pub step_number: u32,

    /// Step title
    pub step_name: String,

    /// Heat intensity for this step
    #[serde(default)]
    pub fire_level: FireLevel,

    /// Explicit target temperature for airfryer/oven steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u32>,

    /// Equipment the step runs on; `None` inherits the recipe default
    /// and is resolved during derivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,

    /// Set by the deriver when the step is structurally one long timer
    /// spanning all of its sub-steps
    #[serde(default)]
    pub continuous_timer: bool,

    /// Ordered sub-steps; never empty after derivation
    pub sub_steps: Vec<SubStep>,
}

impl RecipeStep {
    pub fn new(step_number: u32, step_name: &str, fire_level: FireLevel) -> Self {
        Self {
            step_number,
            step_name: step_name.to_string(),
            fire_level,
            temperature: None,
            equipment: None,
            continuous_timer: false,
            sub_steps: Vec::new(),
        }
    }

    pub fn with_sub_steps(mut self, sub_steps: Vec<SubStep>) -> Self {
        self.sub_steps = sub_steps;
        self
    }

    pub fn has_timer(&self) -> bool {
        self.sub_steps.iter().any(SubStep::is_timer)
    }

    /// First timer sub-step, used to seed continuous-timer steps.
    pub fn first_timer(&self) -> Option<&SubStep> {
        self.sub_steps.iter().find(|sub| sub.is_timer())
    }

    /// Step title plus all sub-step texts, for keyword classification.
    pub fn combined_text(&self) -> String {
        let mut text = self.step_name.clone();
        for sub in &self.sub_steps {
            text.push(' ');
            text.push_str(&sub.combined_text());
        }
        text
    }
}

/// An ingredient with per-bucket quantities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,

    pub emoji: String,

    /// Indispensable ingredients cannot be deselected and anchor loop
    /// counting
    #[serde(default)]
    pub indispensable: bool,

    /// Quantity text per portion bucket
    pub portions: PortionValues<String>,
}

impl Ingredient {
    pub fn new(name: &str, emoji: &str, indispensable: bool, portions: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
            indispensable,
            portions: PortionValues::new(
                portions[0].to_string(),
                portions[1].to_string(),
                portions[2].to_string(),
            ),
        }
    }

    /// Canonical selection key for this ingredient.
    pub fn key(&self) -> String {
        crate::text::ingredient_key(&self.name)
    }
}

/// Unit label shown next to the portion count ("huevo"/"huevos").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortionLabels {
    pub singular: String,
    pub plural: String,
}

impl PortionLabels {
    pub fn new(singular: &str, plural: &str) -> Self {
        Self {
            singular: singular.to_string(),
            plural: plural.to_string(),
        }
    }

    pub fn for_portion(&self, portion: Portion) -> &str {
        match portion {
            Portion::One => &self.singular,
            _ => &self.plural,
        }
    }
}

/// Full content of a recipe: what the progression engine walks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeContent {
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<RecipeStep>,
    pub tip: String,
    pub portion_labels: PortionLabels,
}

/// Recipe-level metadata shown in listings and used during setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Stable identifier (slug)
    pub id: String,

    pub name: String,

    pub icon: String,

    /// Label for the main counted ingredient ("Huevos", "Porciones")
    pub ingredient: String,

    pub description: String,

    /// Default equipment for steps that do not declare their own
    #[serde(default)]
    pub equipment: Equipment,

    /// Recipes shaped as N identical units processed one at a time get
    /// a synthesized per-unit step sequence instead of their static list
    #[serde(default)]
    pub unit_flow: bool,
}
