//! Voice announcement gate.
//!
//! The guide speaks through whatever [`SpeechSink`] the embedding
//! provides (the CLI prints, a real app would drive a TTS engine).
//! [`Announcer`] sits in front of the sink as a queue of one: each
//! request carries a monotonically increasing token, a newer request
//! supersedes the previous one, and completion or error callbacks with a
//! stale token are ignored. Identical text requested twice within
//! [`DUPLICATE_WINDOW_MS`] is suppressed unless forced.
//!
//! Voice is best effort: sink failures only update the status line and
//! never interrupt cooking progression.

use std::time::{Duration, Instant};

/// Window in which a repeated identical announcement is dropped.
pub const DUPLICATE_WINDOW_MS: u64 = 900;

/// Receiver of speech requests.
pub trait SpeechSink {
    /// Speak `text`. `request_id` identifies this request in later
    /// [`Announcer::on_finished`]/[`Announcer::on_error`] calls.
    fn speak(&mut self, request_id: u64, text: &str);

    /// Cancel any in-flight speech.
    fn cancel(&mut self);
}

/// Duplicate gate, enable toggle, and request tokens over a sink.
pub struct Announcer<S> {
    sink: S,
    enabled: bool,
    request_seq: u64,
    last: Option<(String, Instant)>,
    status: String,
}

impl<S: SpeechSink> Announcer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            enabled: true,
            request_seq: 0,
            last: None,
            status: "Voz lista".to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Latest status line from the voice subsystem.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Requests an announcement. Skipped while disabled (unless forced)
    /// and for duplicate text inside the suppression window.
    pub fn announce(&mut self, text: &str, force: bool) {
        self.announce_at(text, force, Instant::now());
    }

    /// [`Announcer::announce`] with an explicit clock, so the duplicate
    /// window is testable.
    pub fn announce_at(&mut self, text: &str, force: bool, now: Instant) {
        if text.trim().is_empty() {
            return;
        }
        if !self.enabled && !force {
            return;
        }
        if !force {
            if let Some((last_text, at)) = &self.last {
                if last_text == text
                    && now.duration_since(*at) < Duration::from_millis(DUPLICATE_WINDOW_MS)
                {
                    return;
                }
            }
        }
        self.last = Some((text.to_string(), now));

        self.request_seq += 1;
        let request_id = self.request_seq;
        self.sink.speak(request_id, text);
    }

    /// Disables voice and cancels in-flight speech. Any outstanding
    /// request token becomes stale.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.request_seq += 1;
        self.sink.cancel();
        self.status = "Voz desactivada".to_string();
    }

    /// Enables voice and replays the current instruction.
    pub fn enable(&mut self, current_instruction: &str) {
        self.enabled = true;
        self.status = "Voz lista".to_string();
        self.announce(current_instruction, true);
    }

    /// Flips the enable state, replaying `current_instruction` when
    /// turning on. Returns the new state.
    pub fn toggle(&mut self, current_instruction: &str) -> bool {
        if self.enabled {
            self.disable();
        } else {
            self.enable(current_instruction);
        }
        self.enabled
    }

    fn is_current(&self, request_id: u64) -> bool {
        request_id == self.request_seq
    }

    /// Sink reports speech started. Stale tokens are ignored.
    pub fn on_started(&mut self, request_id: u64) {
        if self.is_current(request_id) {
            self.status = "Reproduciendo voz".to_string();
        }
    }

    /// Sink reports speech finished. Stale tokens are ignored.
    pub fn on_finished(&mut self, request_id: u64) {
        if self.is_current(request_id) {
            self.status = "Última lectura completada".to_string();
        }
    }

    /// Sink reports a speech failure. Stale tokens are ignored; current
    /// ones only touch the status line.
    pub fn on_error(&mut self, request_id: u64, error: &str) {
        if self.is_current(request_id) {
            self.status = format!("Error TTS: {error}");
        }
    }
}
