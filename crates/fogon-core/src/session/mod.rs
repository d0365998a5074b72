//! The cooking session state machine.
//!
//! [`CookingSession`] owns everything that changes while cooking: the
//! cursor over the effective step list, the optional per-unit loop, the
//! countdown timer, and the single transient prompt. All transitions are
//! driven by exactly two sources (a 1 Hz [`CookingSession::tick`] and
//! discrete user actions), and every operation returns the [`Effect`]s
//! (announcements, beeps) the caller should perform. Boundary violations
//! are silent no-ops; nothing in here can fail.
//!
//! Keeping cursor, loop, timer, and prompt in one aggregate makes the
//! "at most one active prompt" and "timer running, prompt active, or
//! idle" invariants enforceable in one place.

use crate::cues::{self, SubStepCue, FLIP_PROMPT_SECS, REMINDER_PROMPT_SECS};
use crate::derive::CookingPlan;
use crate::models::{
    CookingCursor, FireLevel, Portion, ProgressSnapshot, RecipeStep, StepLoopState, SubStep,
};

#[cfg(test)]
mod tests;

/// Seconds before expiry at which the upcoming sub-step is announced.
pub const ANNOUNCE_AHEAD_SECS: u32 = 15;

/// Remaining-seconds window in which every tick beeps.
pub const BEEP_WINDOW_SECS: u32 = 5;

/// Grace delay between a plain timer expiry and the auto-advance.
pub const AUTO_ADVANCE_GRACE_SECS: u32 = 1;

/// Side effect for the caller to perform after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Speak this text through the voice sink
    Announce { text: String, force: bool },
    /// Short audible countdown beep
    Beep,
}

impl Effect {
    fn announce(text: String) -> Self {
        Effect::Announce { text, force: false }
    }
}

/// The single transient prompt. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Flip the piece; auto-advances when the countdown ends
    Flip { remaining: u32 },
    /// Stir/move the food; auto-advances when the countdown ends
    Stir { remaining: u32 },
    /// Waiting for an explicit tap before starting the next loop unit
    UnitConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TimerState {
    running: bool,
    remaining: u32,
    /// Pending auto-advance delay after a plain expiry
    grace: Option<u32>,
}

/// One live cooking walkthrough over a derived plan.
#[derive(Debug, Clone)]
pub struct CookingSession {
    steps: Vec<RecipeStep>,
    portion: Portion,
    cursor: CookingCursor,
    step_loop: Option<StepLoopState>,
    timer: TimerState,
    prompt: Option<Prompt>,
}

impl CookingSession {
    /// Starts a session at `(0, 0)`. Returns the entry effects (the
    /// first announcement, and the first timer starts silently).
    pub fn new(plan: CookingPlan, portion: Portion) -> (Self, Vec<Effect>) {
        let CookingPlan {
            mut steps,
            step_loop,
        } = plan;
        if steps.is_empty() {
            // The deriver never produces an empty plan, but a session
            // must stay navigable even if handed one.
            steps.push(
                RecipeStep::new(1, "Receta vacía", FireLevel::Low).with_sub_steps(vec![
                    SubStep::action("Sin pasos disponibles", "Vuelve a seleccionar la receta."),
                ]),
            );
        }

        let mut session = Self {
            steps,
            portion,
            cursor: CookingCursor::default(),
            step_loop,
            timer: TimerState::default(),
            prompt: None,
        };
        let effects = session.enter_sub_step();
        (session, effects)
    }

    /// Restores a saved cursor and loop. Out-of-range snapshot values
    /// are clamped; a loop that no longer points inside the plan is
    /// dropped.
    pub fn resume(&mut self, snapshot: &ProgressSnapshot) -> Vec<Effect> {
        let step_index = snapshot.cursor.step_index.min(self.steps.len() - 1);
        let sub_count = self.steps[step_index].sub_steps.len();
        self.cursor = CookingCursor::new(
            step_index,
            snapshot.cursor.sub_step_index.min(sub_count.saturating_sub(1)),
        );
        self.step_loop = snapshot.step_loop.filter(|state| {
            state.step_index < self.steps.len()
                && state.total_items >= 2
                && (1..=state.total_items).contains(&state.current_item)
        });
        self.timer = TimerState::default();
        self.prompt = None;
        self.enter_sub_step()
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    /// Effective step list, read-only (the roadmap view).
    pub fn steps(&self) -> &[RecipeStep] {
        &self.steps
    }

    pub fn portion(&self) -> Portion {
        self.portion
    }

    pub fn cursor(&self) -> CookingCursor {
        self.cursor
    }

    pub fn current_step(&self) -> &RecipeStep {
        &self.steps[self.cursor.step_index]
    }

    pub fn current_sub_step(&self) -> &SubStep {
        &self.current_step().sub_steps[self.cursor.sub_step_index]
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn step_loop(&self) -> Option<StepLoopState> {
        self.step_loop
    }

    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining
    }

    pub fn is_running(&self) -> bool {
        self.timer.running
    }

    pub fn is_at_last_sub_step(&self) -> bool {
        self.cursor.sub_step_index + 1 == self.current_step().sub_steps.len()
    }

    pub fn is_at_last_step(&self) -> bool {
        self.cursor.step_index + 1 == self.steps.len()
    }

    /// True when the active loop is anchored here and units remain.
    pub fn has_pending_loop_items(&self) -> bool {
        self.step_loop.is_some_and(|state| {
            state.step_index == self.cursor.step_index && state.has_pending()
        })
    }

    pub fn is_looping_current_step(&self) -> bool {
        self.step_loop
            .is_some_and(|state| state.step_index == self.cursor.step_index)
    }

    pub fn is_finished(&self) -> bool {
        self.is_at_last_step() && self.is_at_last_sub_step() && !self.has_pending_loop_items()
    }

    /// Cursor and loop state for the persistence snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.cursor, self.step_loop)
    }

    /// The instruction the voice sink would speak right now; used to
    /// replay when voice is re-enabled.
    pub fn current_announcement(&self) -> String {
        match self.prompt {
            Some(Prompt::Flip { .. }) => {
                let text = cues::flip_text();
                format!("{}. {}", text.title, text.message)
            }
            Some(Prompt::Stir { .. }) => {
                let text = cues::reminder_text(self.current_sub_step());
                format!("{}. {}", text.title, text.message)
            }
            _ => {
                let sub = self.current_sub_step();
                if cues::classify(sub) == SubStepCue::Retire {
                    let text = cues::retire_text(sub);
                    format!("{}. {}", text.title, text.message)
                } else if !sub.notes.trim().is_empty() && !sub.notes.starts_with("Cantidad") {
                    format!("{}. {}", sub.name, sub.notes)
                } else {
                    sub.name.clone()
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // User actions
    // ------------------------------------------------------------------

    /// Advances to the next sub-step, loop unit, or step. A no-op once
    /// the recipe is finished. Clears any transient prompt first.
    pub fn next(&mut self) -> Vec<Effect> {
        self.prompt = None;
        self.timer.grace = None;
        self.advance()
    }

    /// Steps back within the current step, or re-enters the previous
    /// loop unit at its last sub-step. Never crosses a step boundary
    /// backward; at the boundary this is a no-op.
    pub fn previous(&mut self) -> Vec<Effect> {
        self.prompt = None;
        self.timer.grace = None;

        if self.cursor.sub_step_index > 0 {
            self.cursor.sub_step_index -= 1;
            if !self.current_step().continuous_timer {
                self.timer = TimerState::default();
            }
            self.enter_sub_step()
        } else if let Some(state) = self.step_loop {
            if state.step_index == self.cursor.step_index && state.current_item > 1 {
                self.step_loop = Some(StepLoopState {
                    current_item: state.current_item - 1,
                    ..state
                });
                self.cursor.sub_step_index = self.current_step().sub_steps.len() - 1;
                self.timer = TimerState::default();
                self.enter_sub_step()
            } else {
                Vec::new()
            }
        } else {
            Vec::new()
        }
    }

    /// Unconditional cursor set used by the roadmap view. Indices are
    /// clamped into range; any running timer stops before re-entry.
    pub fn jump_to(&mut self, step_index: usize, sub_step_index: usize) -> Vec<Effect> {
        self.prompt = None;
        self.timer = TimerState::default();
        let step_index = step_index.min(self.steps.len() - 1);
        let sub_count = self.steps[step_index].sub_steps.len();
        self.cursor = CookingCursor::new(step_index, sub_step_index.min(sub_count - 1));
        self.enter_sub_step()
    }

    /// Confirms the start of the next loop unit after a loop-confirmation
    /// prompt.
    pub fn confirm_next_unit(&mut self) -> Vec<Effect> {
        self.next()
    }

    /// Toggles pause. Only permitted while the current sub-step runs a
    /// timer or the step carries the continuous timer; returns the new
    /// running flag.
    pub fn toggle_pause(&mut self) -> bool {
        if self.current_sub_step().is_timer() || self.current_step().continuous_timer {
            self.timer.running = !self.timer.running && self.timer.remaining > 0;
        }
        self.timer.running
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Advances the session by one second. Drives, in order of
    /// precedence: the active prompt's countdown, a pending auto-advance
    /// grace delay, or the main timer.
    pub fn tick(&mut self) -> Vec<Effect> {
        match self.prompt {
            Some(Prompt::Flip { remaining }) => {
                return self.tick_prompt(remaining, |r| Prompt::Flip { remaining: r });
            }
            Some(Prompt::Stir { remaining }) => {
                return self.tick_prompt(remaining, |r| Prompt::Stir { remaining: r });
            }
            Some(Prompt::UnitConfirm) => return Vec::new(),
            None => {}
        }

        if let Some(grace) = self.timer.grace {
            if grace > 1 {
                self.timer.grace = Some(grace - 1);
                return Vec::new();
            }
            self.timer.grace = None;
            return self.advance();
        }

        if !self.timer.running || self.timer.remaining == 0 {
            return Vec::new();
        }

        self.timer.remaining -= 1;
        let mut effects = Vec::new();

        if self.timer.remaining == ANNOUNCE_AHEAD_SECS {
            if let Some(name) = self.upcoming_sub_step_name() {
                effects.push(Effect::Announce {
                    text: format!("En {ANNOUNCE_AHEAD_SECS} segundos: {name}"),
                    force: true,
                });
            }
        }
        if self.timer.remaining <= BEEP_WINDOW_SECS {
            effects.push(Effect::Beep);
        }
        if self.timer.remaining == 0 {
            self.timer.running = false;
            effects.extend(self.handle_expiry());
        }
        effects
    }

    fn tick_prompt(&mut self, remaining: u32, rebuild: impl Fn(u32) -> Prompt) -> Vec<Effect> {
        if remaining > 1 {
            self.prompt = Some(rebuild(remaining - 1));
            Vec::new()
        } else {
            // Auto-dismiss advances the recipe position exactly once.
            self.prompt = None;
            self.advance()
        }
    }

    /// Priority-ordered expiry rule: flip beats stir beats loop
    /// confirmation beats plain auto-advance.
    fn handle_expiry(&mut self) -> Vec<Effect> {
        let sub = self.current_sub_step();
        match cues::classify(sub) {
            SubStepCue::Flip => {
                self.prompt = Some(Prompt::Flip {
                    remaining: FLIP_PROMPT_SECS,
                });
                vec![Effect::announce(self.current_announcement())]
            }
            SubStepCue::Stir => {
                self.prompt = Some(Prompt::Stir {
                    remaining: cues::stir_prompt_secs(sub),
                });
                vec![Effect::announce(self.current_announcement())]
            }
            _ => {
                if self.is_at_last_sub_step() && self.has_pending_loop_items() {
                    self.prompt = Some(Prompt::UnitConfirm);
                    Vec::new()
                } else {
                    self.timer.grace = Some(AUTO_ADVANCE_GRACE_SECS);
                    Vec::new()
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Moves the cursor forward one position: sub-step, loop unit, or
    /// step, in that order. Terminal no-op when finished.
    fn advance(&mut self) -> Vec<Effect> {
        let step = self.current_step();
        if self.cursor.sub_step_index + 1 < step.sub_steps.len() {
            self.cursor.sub_step_index += 1;
            if !self.current_step().continuous_timer {
                self.timer = TimerState::default();
            }
            return self.enter_sub_step();
        }

        if let Some(state) = self.step_loop {
            if state.step_index == self.cursor.step_index && state.has_pending() {
                self.step_loop = Some(StepLoopState {
                    current_item: state.current_item + 1,
                    ..state
                });
                self.cursor.sub_step_index = 0;
                self.timer = TimerState::default();
                return self.enter_sub_step();
            }
        }

        if self.cursor.step_index + 1 < self.steps.len() {
            let leaving = self.cursor.step_index;
            self.cursor = CookingCursor::new(leaving + 1, 0);
            if self
                .step_loop
                .is_some_and(|state| state.step_index == leaving)
            {
                self.step_loop = None;
            }
            self.timer = TimerState::default();
            return self.enter_sub_step();
        }

        Vec::new()
    }

    /// Applies the entry rules for the sub-step under the cursor: timer
    /// initialization, auto-reminder overlay, and the announcement.
    fn enter_sub_step(&mut self) -> Vec<Effect> {
        let continuous = self.current_step().continuous_timer;
        let sub = self.current_sub_step();

        if let Some(seconds) = sub.timer_seconds(self.portion) {
            if !continuous || self.timer.remaining == 0 {
                self.timer = TimerState {
                    running: true,
                    remaining: seconds,
                    grace: None,
                };
            }
        } else if continuous {
            // The continuous countdown is seeded once, on the step's
            // first sub-step, and survives navigation inside the step.
            if self.cursor.sub_step_index == 0 && self.timer.remaining == 0 {
                if let Some(seconds) = self
                    .current_step()
                    .first_timer()
                    .and_then(|timer| timer.timer_seconds(self.portion))
                {
                    self.timer = TimerState {
                        running: true,
                        remaining: seconds,
                        grace: None,
                    };
                }
            }
        } else {
            self.timer = TimerState::default();
        }

        let sub = self.current_sub_step();
        if cues::is_auto_reminder(sub) {
            self.prompt = Some(Prompt::Stir {
                remaining: REMINDER_PROMPT_SECS,
            });
        } else {
            self.prompt = None;
        }

        vec![Effect::announce(self.current_announcement())]
    }

    /// Name of the sub-step the recipe moves to next, if any.
    fn upcoming_sub_step_name(&self) -> Option<String> {
        let step = self.current_step();
        if self.cursor.sub_step_index + 1 < step.sub_steps.len() {
            return Some(step.sub_steps[self.cursor.sub_step_index + 1].name.clone());
        }
        if self.has_pending_loop_items() {
            return Some(step.sub_steps[0].name.clone());
        }
        self.steps
            .get(self.cursor.step_index + 1)
            .and_then(|next| next.sub_steps.first())
            .map(|sub| sub.name.clone())
    }
}
