//! Whisper speech recognition backend
//!
//! One modal capture session records a fixed window from the microphone,
//! conditions it, and transcribes it locally. Compiled in with the
//! `voice-input` cargo feature.

use crate::config::CaptureConfig;
use crate::speech::audio;
use crate::speech::VoiceCapture;
use crate::{AskpodError, Result};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Shortest window the recognizer is given, in samples at 16 kHz.
/// Anything shorter is treated as "no speech".
const MIN_SAMPLES: usize = audio::RECOGNIZER_SAMPLE_RATE as usize / 2;

pub struct WhisperCapture {
    ctx: WhisperContext,
    config: CaptureConfig,
}

impl WhisperCapture {
    pub fn new(config: CaptureConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(AskpodError::CaptureError(format!(
                "Recognition model not found: {:?}",
                config.model_path
            )));
        }

        info!("Loading recognition model from: {:?}", config.model_path);

        let model_path = config.model_path.to_string_lossy();
        let ctx =
            WhisperContext::new_with_params(&model_path, WhisperContextParameters::default())
                .map_err(|e| {
                    AskpodError::CaptureError(format!("Failed to load model: {}", e))
                })?;

        Ok(Self { ctx, config })
    }

    fn transcribe(&self, samples: &[f32]) -> Result<String> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| AskpodError::CaptureError(format!("Failed to create state: {}", e)))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.config.n_threads);
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        if let Some(language) = &self.config.language {
            params.set_language(Some(language));
        }

        state
            .full(params, samples)
            .map_err(|e| AskpodError::CaptureError(format!("Transcription failed: {}", e)))?;

        let segment_count = state
            .full_n_segments()
            .map_err(|e| AskpodError::CaptureError(e.to_string()))?;

        let mut text = String::new();
        for i in 0..segment_count {
            let segment = state
                .full_get_segment_text(i)
                .map_err(|e| AskpodError::CaptureError(e.to_string()))?;
            text.push_str(&segment);
        }

        Ok(text.trim().to_string())
    }
}

impl VoiceCapture for WhisperCapture {
    fn capture(&mut self, prompt: &str) -> Result<Vec<String>> {
        debug!("Opening capture session: {:?}", prompt);

        let (samples, sample_rate) = audio::record_window(self.config.record_secs)?;
        let prepared = audio::prepare_for_recognition(&samples, sample_rate)?;

        if prepared.len() < MIN_SAMPLES {
            return Ok(Vec::new());
        }

        let text = self.transcribe(&prepared)?;
        if text.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![text])
        }
    }
}
