use super::*;
use crate::derive::CookingPlan;
use crate::models::{FireLevel, StepLoopState};

fn action(name: &str) -> SubStep {
    SubStep::action(name, "")
}

fn step(number: u32, name: &str, sub_steps: Vec<SubStep>) -> RecipeStep {
    RecipeStep::new(number, name, FireLevel::Medium).with_sub_steps(sub_steps)
}

fn plan(steps: Vec<RecipeStep>, step_loop: Option<StepLoopState>) -> CookingPlan {
    CookingPlan { steps, step_loop }
}

/// Two steps of two plain sub-steps each, no loop, no timers.
fn simple_plan() -> CookingPlan {
    plan(
        vec![
            step(1, "Preparar", vec![action("Lavar"), action("Cortar")]),
            step(2, "Servir", vec![action("Emplatar"), action("Llevar a la mesa")]),
        ],
        None,
    )
}

/// Prep step, a 3-unit loop step with two sub-steps, then a closing step.
fn loop_plan() -> CookingPlan {
    plan(
        vec![
            step(1, "Preparar", vec![action("Alistar")]),
            step(
                2,
                "Sellar pieza",
                vec![action("Colocar pieza"), action("Sacar pieza")],
            ),
            step(3, "Servir", vec![action("Emplatar")]),
        ],
        Some(StepLoopState::new(1, 3)),
    )
}

fn announced(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Announce { text, .. } => Some(text.clone()),
            Effect::Beep => None,
        })
        .collect()
}

#[test]
fn test_starts_at_origin_with_announcement() {
    let (session, effects) = CookingSession::new(simple_plan(), Portion::Two);
    assert_eq!(session.cursor(), CookingCursor::new(0, 0));
    assert_eq!(announced(&effects), vec!["Lavar".to_string()]);
    assert!(!session.is_finished());
}

#[test]
fn test_simple_walkthrough_to_finish() {
    let (mut session, _) = CookingSession::new(simple_plan(), Portion::Two);
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(0, 1));
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(1, 0));
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
    assert!(session.is_at_last_step());
    assert!(session.is_at_last_sub_step());
    assert!(session.is_finished());
}

#[test]
fn test_terminal_next_is_idempotent() {
    let (mut session, _) = CookingSession::new(simple_plan(), Portion::Two);
    for _ in 0..3 {
        session.next();
    }
    assert!(session.is_finished());
    for _ in 0..5 {
        let effects = session.next();
        assert!(effects.is_empty());
        assert_eq!(session.cursor(), CookingCursor::new(1, 1));
        assert!(session.is_finished());
    }
}

#[test]
fn test_previous_then_next_restores_position() {
    let (mut session, _) = CookingSession::new(simple_plan(), Portion::Two);
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(0, 1));
    session.previous();
    assert_eq!(session.cursor(), CookingCursor::new(0, 0));
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(0, 1));
}

#[test]
fn test_previous_never_crosses_step_boundary() {
    let (mut session, _) = CookingSession::new(simple_plan(), Portion::Two);
    session.next();
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(1, 0));
    let effects = session.previous();
    assert!(effects.is_empty());
    assert_eq!(session.cursor(), CookingCursor::new(1, 0));
}

#[test]
fn test_previous_at_origin_is_noop() {
    let (mut session, _) = CookingSession::new(simple_plan(), Portion::Two);
    let effects = session.previous();
    assert!(effects.is_empty());
    assert_eq!(session.cursor(), CookingCursor::new(0, 0));
}

#[test]
fn test_loop_completion_in_exact_step_count() {
    let (mut session, _) = CookingSession::new(loop_plan(), Portion::Two);
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(1, 0));
    assert!(session.is_looping_current_step());

    // 3 units x 2 sub-steps per iteration.
    for _ in 0..6 {
        session.next();
    }
    assert_eq!(session.cursor(), CookingCursor::new(2, 0));
    assert!(session.step_loop().is_none());
    assert!(session.is_finished());
}

#[test]
fn test_loop_advances_unit_and_resets_sub_step() {
    let (mut session, _) = CookingSession::new(loop_plan(), Portion::Two);
    session.next();
    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
    assert!(session.has_pending_loop_items());

    session.next();
    assert_eq!(session.cursor(), CookingCursor::new(1, 0));
    assert_eq!(session.step_loop().unwrap().current_item, 2);
}

#[test]
fn test_previous_re_enters_loop_at_last_sub_step() {
    let (mut session, _) = CookingSession::new(loop_plan(), Portion::Two);
    session.next();
    session.next();
    session.next();
    assert_eq!(session.step_loop().unwrap().current_item, 2);
    assert_eq!(session.cursor(), CookingCursor::new(1, 0));

    session.previous();
    assert_eq!(session.step_loop().unwrap().current_item, 1);
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
}

#[test]
fn test_finished_blocked_while_loop_pending() {
    let steps = vec![step(
        1,
        "Freír",
        vec![action("Colocar"), action("Retirar pieza")],
    )];
    let (mut session, _) =
        CookingSession::new(plan(steps, Some(StepLoopState::new(0, 2))), Portion::Two);
    session.next();
    assert!(session.is_at_last_step() && session.is_at_last_sub_step());
    assert!(!session.is_finished());

    session.next();
    session.next();
    assert!(session.is_finished());
}

#[test]
fn test_timer_starts_on_entry_with_bucket_value() {
    let steps = vec![step(
        1,
        "Precalentado",
        vec![
            action("Colocar olla"),
            SubStep::timer("Precalentando...", "", [60, 90, 120]),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Four);
    assert!(!session.is_running());

    session.next();
    assert!(session.is_running());
    assert_eq!(session.time_remaining(), 120);
}

#[test]
fn test_tick_counts_down_announces_and_beeps() {
    let steps = vec![step(
        1,
        "Cocción",
        vec![
            SubStep::timer("Hervir", "", [20, 20, 20]),
            action("Apagar"),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);
    assert_eq!(session.time_remaining(), 20);

    // 20 -> 16: quiet.
    for _ in 0..4 {
        assert!(session.tick().is_empty());
    }

    // 15: forced announcement of the upcoming sub-step.
    let effects = session.tick();
    assert_eq!(
        effects,
        vec![Effect::Announce {
            text: "En 15 segundos: Apagar".to_string(),
            force: true,
        }]
    );

    // 14 -> 6: quiet again.
    for _ in 0..9 {
        assert!(session.tick().is_empty());
    }

    // 5..=1: a beep per tick.
    for expected in (1..=5).rev() {
        let effects = session.tick();
        assert_eq!(session.time_remaining(), expected);
        assert!(effects.contains(&Effect::Beep));
    }
}

#[test]
fn test_plain_expiry_auto_advances_after_grace() {
    let steps = vec![step(
        1,
        "Cocción",
        vec![SubStep::timer("Hervir", "", [2, 2, 2]), action("Apagar")],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    session.tick();
    let effects = session.tick();
    // Expired: beep fired, timer stopped, advance pending.
    assert!(effects.contains(&Effect::Beep));
    assert!(!session.is_running());
    assert_eq!(session.cursor(), CookingCursor::new(0, 0));

    // Grace tick performs the advance.
    let effects = session.tick();
    assert_eq!(session.cursor(), CookingCursor::new(0, 1));
    assert_eq!(announced(&effects), vec!["Apagar".to_string()]);
}

#[test]
fn test_expiry_flip_beats_stir() {
    // "Dorar el primer lado" matches flip (primer lado) and stir (dorar).
    let steps = vec![step(
        1,
        "Freír huevo",
        vec![
            SubStep::timer("Dorar el primer lado", "", [1, 1, 1]),
            SubStep::timer("Voltear y dorar el reverso", "", [10, 10, 10]),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    session.tick();
    assert_eq!(
        session.prompt(),
        Some(Prompt::Flip {
            remaining: FLIP_PROMPT_SECS
        })
    );
}

#[test]
fn test_expiry_stir_prompt_durations() {
    let steps = vec![step(
        1,
        "Cocción",
        vec![
            SubStep::timer("Dorar primer tramo", "Papas.", [1, 1, 1]),
            action("Tanda completada"),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);
    session.tick();
    assert_eq!(session.prompt(), Some(Prompt::Stir { remaining: 5 }));

    // Egg text stretches the prompt to seven seconds.
    let steps = vec![step(
        1,
        "Freír",
        vec![
            SubStep::timer("Dorar huevo", "", [1, 1, 1]),
            action("Retirar huevo"),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);
    session.tick();
    assert_eq!(session.prompt(), Some(Prompt::Stir { remaining: 7 }));
}

#[test]
fn test_flip_prompt_auto_dismisses_and_advances_once() {
    let steps = vec![step(
        1,
        "Freír huevo",
        vec![
            SubStep::timer("Dorar el primer lado", "", [1, 1, 1]),
            action("Retirar huevo"),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    session.tick();
    assert!(matches!(session.prompt(), Some(Prompt::Flip { .. })));

    // Six countdown ticks keep the prompt up.
    for _ in 0..6 {
        session.tick();
        assert!(matches!(session.prompt(), Some(Prompt::Flip { .. })));
        assert_eq!(session.cursor(), CookingCursor::new(0, 0));
    }

    // Seventh tick dismisses and advances exactly once.
    session.tick();
    assert_eq!(session.prompt(), None);
    assert_eq!(session.cursor(), CookingCursor::new(0, 1));
}

#[test]
fn test_expiry_requests_unit_confirmation_when_loop_pending() {
    let steps = vec![step(
        1,
        "Freír pieza",
        vec![SubStep::timer("Cocinar pieza", "", [1, 1, 1])],
    )];
    let (mut session, _) =
        CookingSession::new(plan(steps, Some(StepLoopState::new(0, 3))), Portion::Two);

    session.tick();
    assert_eq!(session.prompt(), Some(Prompt::UnitConfirm));

    // The confirmation waits for the user; ticking changes nothing.
    for _ in 0..10 {
        assert!(session.tick().is_empty());
        assert_eq!(session.cursor(), CookingCursor::new(0, 0));
    }

    session.confirm_next_unit();
    assert_eq!(session.prompt(), None);
    assert_eq!(session.step_loop().unwrap().current_item, 2);
    assert_eq!(session.cursor(), CookingCursor::new(0, 0));
}

#[test]
fn test_auto_reminder_opens_stir_prompt_on_entry() {
    let steps = vec![step(
        1,
        "Sellado",
        vec![
            action("Colocar pieza"),
            SubStep::action("Recordatorio: mover o voltear", "Haz el giro."),
            action("Retirar pieza"),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    let effects = session.next();
    assert_eq!(
        session.prompt(),
        Some(Prompt::Stir {
            remaining: REMINDER_PROMPT_SECS
        })
    );
    assert_eq!(
        announced(&effects),
        vec!["Recordatorio: mover o voltear. Haz el giro.".to_string()]
    );

    // The overlay auto-dismisses into the next sub-step.
    for _ in 0..REMINDER_PROMPT_SECS {
        session.tick();
    }
    assert_eq!(session.prompt(), None);
    assert_eq!(session.cursor(), CookingCursor::new(0, 2));
}

#[test]
fn test_next_clears_prompts() {
    let steps = vec![step(
        1,
        "Freír huevo",
        vec![
            SubStep::timer("Dorar el primer lado", "", [1, 1, 1]),
            action("Retirar huevo"),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);
    session.tick();
    assert!(matches!(session.prompt(), Some(Prompt::Flip { .. })));

    session.next();
    assert_eq!(session.prompt(), None);
    assert_eq!(session.cursor(), CookingCursor::new(0, 1));
}

#[test]
fn test_pause_only_on_timer_sub_steps() {
    let steps = vec![step(
        1,
        "Cocción",
        vec![action("Colocar"), SubStep::timer("Hervir", "", [30, 30, 30])],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    // Plain sub-step: pause is refused.
    assert!(!session.toggle_pause());

    session.next();
    assert!(session.is_running());
    assert!(!session.toggle_pause());
    let frozen = session.time_remaining();
    assert!(session.tick().is_empty());
    assert_eq!(session.time_remaining(), frozen);

    // Resume keeps the remaining time.
    assert!(session.toggle_pause());
    session.tick();
    assert_eq!(session.time_remaining(), frozen - 1);
}

#[test]
fn test_continuous_step_keeps_one_countdown() {
    let mut continuous = step(
        1,
        "Graneado",
        vec![
            action("Baja el fuego"),
            action("Pon la tapa"),
            SubStep::timer("Reposar tapado", "", [900, 960, 1020]),
        ],
    );
    continuous.continuous_timer = true;
    let steps = vec![continuous, step(2, "Final", vec![action("Servir")])];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    // Seeded from the step's timer on entering sub-step 0.
    assert!(session.is_running());
    assert_eq!(session.time_remaining(), 960);

    session.tick();
    session.next();
    // Navigation inside the step leaves the countdown alone.
    assert_eq!(session.time_remaining(), 959);
    assert!(session.is_running());

    session.next();
    assert_eq!(session.time_remaining(), 959);

    session.previous();
    session.previous();
    assert_eq!(session.cursor(), CookingCursor::new(0, 0));
    assert_eq!(session.time_remaining(), 959);

    // Pause is permitted even on the step's plain sub-steps.
    assert!(!session.toggle_pause());
    assert!(session.toggle_pause());

    // Leaving the step drops the countdown.
    session.jump_to(1, 0);
    assert!(!session.is_running());
    assert_eq!(session.time_remaining(), 0);
}

#[test]
fn test_jump_to_clamps_and_restarts_timer() {
    let steps = vec![
        step(1, "Preparar", vec![action("Lavar")]),
        step(
            2,
            "Cocción",
            vec![action("Colocar"), SubStep::timer("Hervir", "", [30, 40, 50])],
        ),
    ];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);

    session.jump_to(1, 1);
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
    assert!(session.is_running());
    assert_eq!(session.time_remaining(), 40);

    // Out-of-range indices clamp to the last valid position.
    session.jump_to(9, 9);
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
}

#[test]
fn test_resume_restores_cursor_and_loop() {
    let (mut session, _) = CookingSession::new(loop_plan(), Portion::Two);
    let snapshot = ProgressSnapshot::new(
        CookingCursor::new(1, 1),
        Some(StepLoopState {
            step_index: 1,
            total_items: 3,
            current_item: 2,
        }),
    );
    session.resume(&snapshot);
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
    assert_eq!(session.step_loop().unwrap().current_item, 2);
}

#[test]
fn test_resume_drops_invalid_loop_and_clamps_cursor() {
    let (mut session, _) = CookingSession::new(simple_plan(), Portion::Two);
    let snapshot = ProgressSnapshot::new(
        CookingCursor::new(7, 9),
        Some(StepLoopState {
            step_index: 5,
            total_items: 3,
            current_item: 2,
        }),
    );
    session.resume(&snapshot);
    assert_eq!(session.cursor(), CookingCursor::new(1, 1));
    assert!(session.step_loop().is_none());
}

#[test]
fn test_announcement_skips_quantity_notes() {
    let steps = vec![step(
        1,
        "Aceite",
        vec![
            SubStep::amount("Agregar aceite", "Cantidad:", ["1", "2", "3"]),
            SubStep::action("Calentar", "Sin humear."),
        ],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);
    assert_eq!(session.current_announcement(), "Agregar aceite");
    session.next();
    assert_eq!(session.current_announcement(), "Calentar. Sin humear.");
}

#[test]
fn test_retire_sub_step_announcement() {
    let steps = vec![step(
        1,
        "Freír",
        vec![action("Colocar"), SubStep::action("Retirar huevo 1", "Al plato.")],
    )];
    let (mut session, _) = CookingSession::new(plan(steps, None), Portion::Two);
    session.next();
    assert_eq!(
        session.current_announcement(),
        "El huevo está listo. Retira tu huevo y prepárate para el siguiente."
    );
}

#[test]
fn test_empty_plan_yields_navigable_placeholder() {
    let (mut session, _) = CookingSession::new(plan(Vec::new(), None), Portion::Two);
    assert_eq!(session.steps().len(), 1);
    assert!(session.next().is_empty());
    assert!(session.is_finished());
}
