//! Terminal speech sink.
//!
//! Stands in for a real TTS engine: announcements are printed on their
//! own line and complete immediately. The request id of the last speak
//! call is kept so the cooking loop can acknowledge completion through
//! the announcer's token protocol.

use fogon_core::SpeechSink;

#[derive(Default)]
pub struct TerminalSpeech {
    last_request_id: u64,
}

impl TerminalSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the most recent speak request.
    pub fn last_request_id(&self) -> u64 {
        self.last_request_id
    }
}

impl SpeechSink for TerminalSpeech {
    fn speak(&mut self, request_id: u64, text: &str) {
        self.last_request_id = request_id;
        println!("🔊 {text}");
        log::debug!("speech request {request_id}: {text}");
    }

    fn cancel(&mut self) {
        log::debug!("speech canceled at request {}", self.last_request_id);
    }
}
