//! Core library for the Fogon interactive cooking guide.
//!
//! This crate implements the recipe progression engine: portion
//! resolution, derivation of the effective step list, the tick-driven
//! cooking session state machine, the voice announcement gate, and the
//! snapshot store used to resume a recipe after a restart.
//!
//! # Architecture
//!
//! ```text
//! QuantityIntent ──▶ portions::resolve ──▶ bucket + scale factor
//!                                             │
//! RecipeContent ──▶ derive::derive_cooking_plan ──▶ effective steps
//!                                             │
//!                          session::CookingSession (1 Hz tick + actions)
//!                                             │
//!                              Effects ──▶ voice::Announcer ──▶ sink
//! ```
//!
//! The session is pure state: every operation returns the effects
//! (announcements, beeps) for the embedding to perform. Persistence and
//! recipe import go through the async [`Guide`] facade, which wraps the
//! SQLite store in blocking tasks.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashSet;
//!
//! use fogon_core::{
//!     content, derive, portions, CookingSession, QuantityIntent,
//! };
//!
//! let recipe = content::catalog().remove(0);
//! let recipe_content = content::content_for(&recipe.id).unwrap();
//! let intent = QuantityIntent::for_people(2);
//! let resolution = portions::resolve(&intent, &recipe, &recipe_content);
//!
//! let plan = derive::derive_cooking_plan(&derive::DeriveOptions {
//!     recipe: &recipe,
//!     content: &recipe_content,
//!     deselected: &HashSet::new(),
//!     intent: &intent,
//!     resolution: &resolution,
//! });
//!
//! let (mut session, _effects) = CookingSession::new(plan, resolution.portion);
//! session.next();
//! assert!(!session.is_finished());
//! ```

pub mod content;
pub mod cues;
pub mod derive;
pub mod display;
pub mod error;
pub mod guide;
pub mod models;
pub mod portions;
pub mod session;
pub mod store;
pub mod text;
pub mod voice;

// Re-export commonly used types
pub use derive::{CookingPlan, DeriveOptions};
pub use error::{GuideError, Result};
pub use guide::{Guide, GuideBuilder};
pub use models::{
    AmountUnit, CookingCursor, Equipment, FireLevel, Ingredient, Portion, ProduceSize,
    ProgressSnapshot, Quantity, QuantityIntent, Recipe, RecipeContent, RecipeStep, StepLoopState,
    SubStep,
};
pub use portions::PortionResolution;
pub use session::{CookingSession, Effect, Prompt};
pub use store::Database;
pub use voice::{Announcer, SpeechSink};
