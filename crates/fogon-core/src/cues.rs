//! Keyword classification of sub-steps and steps.
//!
//! All flip/stir/retire/loop heuristics over the Spanish recipe text
//! live here as one pluggable classification surface, instead of being
//! scattered across the deriver and the session. Matching is case- and
//! accent-insensitive via [`crate::text::normalize_text`].

use crate::models::{RecipeStep, SubStep};
use crate::text::normalize_text;

/// Seconds a flip prompt stays on screen before auto-advancing.
pub const FLIP_PROMPT_SECS: u32 = 7;

/// Seconds an auto-reminder overlay stays on screen.
pub const REMINDER_PROMPT_SECS: u32 = 5;

/// Classification of a sub-step, checked in priority order on timer
/// expiry: a sub-step matching both flip and stir vocabulary is a Flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubStepCue {
    /// First-side cooking: expiry shows the flip prompt
    Flip,
    /// Frying/browning stretch: expiry shows the stir prompt
    Stir,
    /// Remove-the-piece instruction: gets a dedicated announcement
    Retire,
    Plain,
}

/// Classifies a sub-step for expiry handling and announcements.
pub fn classify(sub: &SubStep) -> SubStepCue {
    let text = normalize_text(&sub.combined_text());
    if sub.is_timer() {
        let first_side = ["primera cara", "primer lado", "primera vuelta", "por un lado"];
        if first_side.iter().any(|kw| text.contains(kw)) {
            return SubStepCue::Flip;
        }
        if text.contains("dorar") || text.contains("freir") {
            return SubStepCue::Stir;
        }
        SubStepCue::Plain
    } else {
        let name = normalize_text(&sub.name);
        if name.contains("retirar") || name.contains("tanda completada") {
            SubStepCue::Retire
        } else {
            SubStepCue::Plain
        }
    }
}

/// Non-timer sub-steps whose text asks for a physical move open a
/// reminder overlay immediately on entry.
pub fn is_auto_reminder(sub: &SubStep) -> bool {
    if sub.is_timer() {
        return false;
    }
    let text = normalize_text(&sub.combined_text());
    [
        "recordatorio",
        "mueve",
        "mover",
        "remueve",
        "remover",
        "revuelve",
        "revolver",
        "voltea",
        "voltear",
        "gira",
        "girar",
        "dar vuelta",
        "redistribuye",
        "redistribuir",
        "stir",
        "flip",
        "turn",
    ]
    .iter()
    .any(|kw| text.contains(kw))
}

/// Duration of the stir prompt for this sub-step. Eggs get a slightly
/// longer window to finish the flip.
pub fn stir_prompt_secs(sub: &SubStep) -> u32 {
    if normalize_text(&sub.combined_text()).contains("huevo") {
        7
    } else {
        5
    }
}

/// True when a step is eligible to be repeated once per unit: it reads
/// like frying/searing a protein unit, has at least one timer, and is
/// not a preheat/boil/rest step.
pub fn is_loopable_step(step: &RecipeStep) -> bool {
    let text = normalize_text(&step.combined_text());
    let blocked = ["precalent", "calentar aceite", "hervir", "reposo"];
    if blocked.iter().any(|kw| text.contains(kw)) {
        return false;
    }
    let keywords = [
        "frei", "frit", "plancha", "sella", "dora", "huevo", "pechuga", "bistec", "filete",
    ];
    keywords.iter().any(|kw| text.contains(kw)) && step.has_timer()
}

/// True when a sub-step already tells the user to adjust the heat, so
/// the deriver must not inject a second transition instruction.
pub fn declares_level_adjustment(sub: &SubStep) -> bool {
    let text = normalize_text(&sub.combined_text());
    let level_word = ["fuego", "temperatura", "grados", "°c"]
        .iter()
        .any(|kw| text.contains(kw));
    let adjustment_verb = ["baja", "bajar", "sube", "subir", "ajusta", "ajustar"]
        .iter()
        .any(|kw| text.contains(kw));
    level_word && adjustment_verb
}

/// Title and message of a transient overlay or announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText {
    pub title: String,
    pub message: String,
}

/// Spoken line for the flip prompt.
pub fn flip_text() -> PromptText {
    PromptText {
        title: "Voltea el huevo".to_string(),
        message: "Continúa con el lado B.".to_string(),
    }
}

/// Stir prompt wording, specialized for fried potatoes.
pub fn stir_text(sub: &SubStep) -> PromptText {
    let text = normalize_text(&sub.combined_text());
    if text.contains("papa") || text.contains("frita") {
        if text.contains("segundo tramo") {
            PromptText {
                title: "Mover nuevamente".to_string(),
                message: "Vuelve a mover para terminar de dorar parejo.".to_string(),
            }
        } else {
            PromptText {
                title: "Mover papas".to_string(),
                message: "Remueve y separa para evitar que se peguen.".to_string(),
            }
        }
    } else {
        PromptText {
            title: "Recordatorio".to_string(),
            message: "Realiza el giro o movimiento indicado antes del siguiente tramo.".to_string(),
        }
    }
}

/// Overlay wording for an auto-reminder sub-step: the sub-step's own
/// text, with a generic fallback when the notes are empty.
pub fn reminder_text(sub: &SubStep) -> PromptText {
    if is_auto_reminder(sub) {
        PromptText {
            title: sub.name.clone(),
            message: if sub.notes.trim().is_empty() {
                "Realiza la acción indicada antes de continuar.".to_string()
            } else {
                sub.notes.clone()
            },
        }
    } else {
        stir_text(sub)
    }
}

/// Announcement for a retire sub-step, specialized by what is being
/// removed.
pub fn retire_text(sub: &SubStep) -> PromptText {
    let text = normalize_text(&sub.combined_text());
    if text.contains("huevo") {
        PromptText {
            title: "El huevo está listo".to_string(),
            message: "Retira tu huevo y prepárate para el siguiente.".to_string(),
        }
    } else if normalize_text(&sub.name).contains("tanda") {
        PromptText {
            title: "Tanda completada".to_string(),
            message: "Retira las papas, escurre y continúa con la siguiente tanda.".to_string(),
        }
    } else {
        PromptText {
            title: "Pieza completada".to_string(),
            message: "Retira la pieza y prepárate para la siguiente.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FireLevel;

    #[test]
    fn test_flip_wins_over_stir() {
        // "Dorar el primer lado" matches both flip and stir vocabulary.
        let sub = SubStep::timer("Dorar el primer lado", "Cocina por el primer lado.", [10, 10, 10]);
        assert_eq!(classify(&sub), SubStepCue::Flip);
    }

    #[test]
    fn test_stir_classification() {
        let sub = SubStep::timer("Dorar primer tramo", "Comienza la fritura.", [75, 90, 120]);
        assert_eq!(classify(&sub), SubStepCue::Stir);
    }

    #[test]
    fn test_plain_timer() {
        let sub = SubStep::timer("Precalentando...", "La olla debe estar seca.", [60, 90, 120]);
        assert_eq!(classify(&sub), SubStepCue::Plain);
    }

    #[test]
    fn test_retire_classification() {
        let sub = SubStep::action("Retirar huevo 1", "Lleva al plato.");
        assert_eq!(classify(&sub), SubStepCue::Retire);
        let sub = SubStep::action("Tanda completada", "Retira y escurre.");
        assert_eq!(classify(&sub), SubStepCue::Retire);
    }

    #[test]
    fn test_auto_reminder_detection() {
        let sub = SubStep::action("Recordatorio: mover o voltear", "Haz el giro.");
        assert!(is_auto_reminder(&sub));
        let sub = SubStep::action("Agregar aceite", "Cantidad:");
        assert!(!is_auto_reminder(&sub));
        // Timer sub-steps never auto-remind, whatever their text says.
        let sub = SubStep::timer("Mueve el arroz", "Airea.", [30, 30, 30]);
        assert!(!is_auto_reminder(&sub));
    }

    #[test]
    fn test_stir_prompt_secs_longer_for_eggs() {
        let egg = SubStep::timer("Freír huevo", "Dorar.", [10, 10, 10]);
        assert_eq!(stir_prompt_secs(&egg), 7);
        let fries = SubStep::timer("Dorar primer tramo", "Papas.", [75, 90, 120]);
        assert_eq!(stir_prompt_secs(&fries), 5);
    }

    #[test]
    fn test_loopable_step() {
        let frying = RecipeStep::new(2, "Freír pechuga", FireLevel::Medium).with_sub_steps(vec![
            SubStep::timer("Sellar primer lado", "Dorar bien.", [120, 150, 180]),
        ]);
        assert!(is_loopable_step(&frying));

        // Boiling vocabulary blocks looping even with fry keywords.
        let boiling = RecipeStep::new(1, "Hervir agua", FireLevel::High).with_sub_steps(vec![
            SubStep::timer("Llevar a ebullición", "Para el huevo.", [240, 300, 360]),
        ]);
        assert!(!is_loopable_step(&boiling));

        // No timer, no loop.
        let prep = RecipeStep::new(1, "Freír luego", FireLevel::Medium)
            .with_sub_steps(vec![SubStep::action("Cortar filete", "Parejo.")]);
        assert!(!is_loopable_step(&prep));
    }

    #[test]
    fn test_declares_level_adjustment() {
        let sub = SubStep::action("Baja el fuego", "Fuego al mínimo.");
        assert!(declares_level_adjustment(&sub));
        let sub = SubStep::action("Pon la tapa", "El vapor termina la cocción.");
        assert!(!declares_level_adjustment(&sub));
    }

    #[test]
    fn test_retire_text_variants() {
        let egg = SubStep::action("Retirar huevo 2", "Lleva al plato.");
        assert_eq!(retire_text(&egg).title, "El huevo está listo");
        let batch = SubStep::action("Tanda completada", "Retira y escurre.");
        assert_eq!(retire_text(&batch).title, "Tanda completada");
        let generic = SubStep::action("Retirar pieza", "Con cuidado.");
        assert_eq!(retire_text(&generic).title, "Pieza completada");
    }

    #[test]
    fn test_stir_text_for_potatoes() {
        let first = SubStep::timer("Dorar primer tramo", "Papas al aceite.", [75, 90, 120]);
        assert_eq!(stir_text(&first).title, "Mover papas");
        let second = SubStep::timer("Dorar segundo tramo", "Papas casi listas.", [75, 90, 120]);
        assert_eq!(stir_text(&second).title, "Mover nuevamente");
    }
}
