//! Platform text-to-speech backend
//!
//! Wraps the operating system's speech service via the `tts` crate.
//! Compiled in with the `speech-output` cargo feature.

use crate::speech::SpeechSynthesizer;
use crate::{AskpodError, Result};
use tracing::{debug, info};
use tts::Tts;

pub struct NativeSynth {
    tts: Tts,
}

impl NativeSynth {
    pub fn new() -> Result<Self> {
        let tts = Tts::default()
            .map_err(|e| AskpodError::SynthError(format!("Failed to initialize: {}", e)))?;

        info!("Platform speech synthesizer initialized");

        Ok(Self { tts })
    }
}

impl SpeechSynthesizer for NativeSynth {
    fn speak(&mut self, text: &str, utterance_id: &str) -> Result<()> {
        debug!("Speaking utterance {:?} ({} chars)", utterance_id, text.len());

        // interrupt=true flushes whatever is currently being spoken
        self.tts
            .speak(text, true)
            .map(|_| ())
            .map_err(|e| AskpodError::SynthError(e.to_string()))
    }

    fn stop(&mut self) -> Result<()> {
        self.tts
            .stop()
            .map(|_| ())
            .map_err(|e| AskpodError::SynthError(e.to_string()))
    }
}
