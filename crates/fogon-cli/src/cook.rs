//! Interactive cooking loop.
//!
//! Drives a [`CookingSession`] from a single 1 Hz interval plus stdin
//! commands, prints the current position whenever the cursor moves, and
//! persists a resume snapshot on every cursor change. The interval is
//! dropped with the loop, so no ticks outlive the cooking screen.

use std::fmt::Write as _;

use anyhow::Result;
use fogon_core::display::Roadmap;
use fogon_core::{
    derive, portions, Announcer, CookingSession, Effect, Guide, Prompt, SubStep,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::args::CookArgs;
use crate::cli::{build_intent, deselection_set};
use crate::renderer::TerminalRenderer;
use crate::speech::TerminalSpeech;

const HELP_TEXT: &str = "\
Comandos: **Enter/n** siguiente · **p** anterior · **pause** pausar/reanudar · \
**ok** confirmar unidad · **j <paso> <sub>** saltar · **r** hoja de ruta · \
**v** voz · **q** salir\n";

pub async fn run(guide: &Guide, renderer: &TerminalRenderer, args: CookArgs) -> Result<()> {
    let recipe = guide.recipe(&args.recipe_id).await?;
    let content = guide.recipe_content(&args.recipe_id).await?;
    let intent = build_intent(&args.quantity)?;
    let resolution = portions::resolve(&intent, &recipe, &content);
    let deselected = deselection_set(&args.without);

    let plan = derive::derive_cooking_plan(&derive::DeriveOptions {
        recipe: &recipe,
        content: &content,
        deselected: &deselected,
        intent: &intent,
        resolution: &resolution,
    });

    let (mut session, start_effects) = CookingSession::new(plan, resolution.portion);
    let mut announcer = Announcer::new(TerminalSpeech::new());
    if args.no_voice {
        announcer.disable();
    }

    if args.restart {
        guide.clear_progress(&recipe.id).await?;
        apply_effects(&mut announcer, start_effects);
    } else if let Some(snapshot) = guide.load_progress(&recipe.id).await? {
        log::info!(
            "resuming {} at step {}, sub-step {}",
            recipe.id,
            snapshot.cursor.step_index + 1,
            snapshot.cursor.sub_step_index + 1
        );
        let effects = session.resume(&snapshot);
        renderer.render("_Retomando donde quedaste (usa `--restart` para empezar de cero)._\n")?;
        apply_effects(&mut announcer, effects);
    } else {
        apply_effects(&mut announcer, start_effects);
    }

    renderer.render(&format!(
        "# {} {} — {}\n\n_{}_\n\n{HELP_TEXT}",
        recipe.icon, recipe.name, recipe.description, resolution.timing_label
    ))?;
    renderer.render(&position_markdown(&session))?;

    let mut last_saved = session.snapshot();
    // First tick one second from now; an immediate tick would eat a
    // second off the first timer.
    let mut ticker = interval_at(Instant::now() + Duration::from_secs(1), Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let effects = session.tick();
                apply_effects(&mut announcer, effects);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if handle_command(line.trim(), &mut session, &mut announcer, renderer)? {
                    break;
                }
            }
        }

        let snapshot = session.snapshot();
        if snapshot.cursor != last_saved.cursor || snapshot.step_loop != last_saved.step_loop {
            guide.save_progress(&recipe.id, snapshot.clone()).await?;
            last_saved = snapshot;
            renderer.render(&position_markdown(&session))?;
        }

        if session.is_finished() && session.prompt().is_none() && !session.is_running() {
            renderer.render("\n**¡Receta completada!** Buen provecho.\n")?;
            guide.clear_progress(&recipe.id).await?;
            break;
        }
    }

    Ok(())
}

fn apply_effects(announcer: &mut Announcer<TerminalSpeech>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Announce { text, force } => {
                announcer.announce(&text, force);
                // The terminal sink speaks synchronously; acknowledge
                // with its token so stale requests stay ignored.
                let request_id = announcer.sink().last_request_id();
                announcer.on_finished(request_id);
            }
            Effect::Beep => {
                print!("\x07");
            }
        }
    }
}

/// Executes one stdin command. Returns true when the loop should end.
fn handle_command(
    input: &str,
    session: &mut CookingSession,
    announcer: &mut Announcer<TerminalSpeech>,
    renderer: &TerminalRenderer,
) -> Result<bool> {
    let mut parts = input.split_whitespace();
    match parts.next().unwrap_or("") {
        "" | "n" | "next" => {
            let effects = session.next();
            apply_effects(announcer, effects);
        }
        "p" | "prev" => {
            let effects = session.previous();
            apply_effects(announcer, effects);
        }
        "ok" | "c" => {
            let effects = session.confirm_next_unit();
            apply_effects(announcer, effects);
        }
        "pause" => {
            let running = session.toggle_pause();
            renderer.render(if running {
                "_Temporizador reanudado._\n"
            } else {
                "_Temporizador en pausa._\n"
            })?;
        }
        "j" | "jump" => {
            let step: Option<usize> = parts.next().and_then(|raw| raw.parse().ok());
            let sub: Option<usize> = parts.next().and_then(|raw| raw.parse().ok());
            match step {
                Some(step) if step >= 1 => {
                    let sub = sub.unwrap_or(1).max(1);
                    let effects = session.jump_to(step - 1, sub - 1);
                    apply_effects(announcer, effects);
                    renderer.render(&position_markdown(session))?;
                }
                _ => renderer.render("_Uso: j <paso> <sub> (desde 1)._\n")?,
            }
        }
        "r" | "roadmap" => {
            renderer.render(
                &Roadmap {
                    steps: session.steps(),
                    portion: session.portion(),
                }
                .to_string(),
            )?;
        }
        "v" | "voice" => {
            let enabled = announcer.toggle(&session.current_announcement());
            renderer.render(if enabled {
                "_Voz activada._\n"
            } else {
                "_Voz desactivada._\n"
            })?;
        }
        "q" | "quit" | "exit" => return Ok(true),
        _ => renderer.render(HELP_TEXT)?,
    }
    Ok(false)
}

/// Markdown panel for the current position.
fn position_markdown(session: &CookingSession) -> String {
    let step = session.current_step();
    let sub = session.current_sub_step();
    let cursor = session.cursor();

    let mut markdown = String::new();
    let _ = writeln!(markdown, "---");
    let _ = writeln!(
        markdown,
        "## Paso {}/{}: {}",
        step.step_number,
        session.steps().len(),
        step.step_name
    );
    if let Some(state) = session.step_loop() {
        if state.step_index == cursor.step_index {
            let _ = writeln!(
                markdown,
                "_Unidad {} de {}_",
                state.current_item, state.total_items
            );
        }
    }
    let _ = writeln!(
        markdown,
        "**{}** ({} de {})",
        sub.name,
        cursor.sub_step_index + 1,
        step.sub_steps.len()
    );
    if !sub.notes.trim().is_empty() {
        let _ = writeln!(markdown, "{}", sub.notes);
    }
    let _ = writeln!(markdown, "{}", status_line(session, sub));
    markdown
}

fn status_line(session: &CookingSession, sub: &SubStep) -> String {
    match session.prompt() {
        Some(Prompt::Flip { remaining }) => {
            format!("👉 **¡Voltea ahora!** (continúa en {remaining} s)")
        }
        Some(Prompt::Stir { remaining }) => {
            format!("👉 **Mueve o remueve** (continúa en {remaining} s)")
        }
        Some(Prompt::UnitConfirm) => "Escribe `ok` para empezar la siguiente unidad.".to_string(),
        None => {
            if sub.is_timer() || session.current_step().continuous_timer {
                if session.is_running() {
                    format!("⏱ {} s", session.time_remaining())
                } else if session.time_remaining() > 0 {
                    format!("⏱ {} s (en pausa)", session.time_remaining())
                } else {
                    "⏱ —".to_string()
                }
            } else {
                let value = sub.value_text(session.portion());
                if value == fogon_core::models::CONTINUE_SENTINEL {
                    "Pulsa Enter para continuar.".to_string()
                } else {
                    format!("Cantidad: {value}")
                }
            }
        }
    }
}
