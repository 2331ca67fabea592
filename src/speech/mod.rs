//! Speech I/O adapters
//!
//! Two independent side channels around the query flow:
//! - Voice capture (speech-to-text): a modal capture session returning
//!   transcript candidates, of which only the first is used
//! - Speech output (text-to-speech): reads a selected answer aloud,
//!   interrupting whatever is currently being spoken
//!
//! Both run as worker threads behind command/event channels; the concrete
//! engines are pluggable backends behind the two traits below. Platform
//! backends are compiled in via the `voice-input` and `speech-output`
//! cargo features; without them the factories report the feature
//! unavailable and the UI degrades gracefully.

pub mod capture;
pub mod tts;

#[cfg(feature = "voice-input")]
pub mod audio;
#[cfg(feature = "speech-output")]
pub mod native;
#[cfg(feature = "voice-input")]
pub mod whisper;

pub use capture::{CaptureCommand, CaptureEvent, CapturePipeline};
pub use tts::{TtsCommand, TtsEvent, TtsPipeline};

use crate::{AskpodError, Result};
use crate::config::CaptureConfig;

/// A text-to-speech engine.
pub trait SpeechSynthesizer: Send {
    /// Speak `text`, interrupting any utterance currently in progress.
    /// The utterance id is used for log correlation only.
    fn speak(&mut self, text: &str, utterance_id: &str) -> Result<()>;

    /// Stop whatever is currently being spoken.
    fn stop(&mut self) -> Result<()>;
}

/// A modal speech-to-text capture session.
///
/// `capture` blocks for the duration of one session and returns zero or
/// more transcript candidates, best first.
pub trait VoiceCapture: Send {
    fn capture(&mut self, prompt: &str) -> Result<Vec<String>>;
}

/// Deferred constructor for a synthesizer backend; runs on the pipeline
/// worker so a slow engine init never blocks the UI thread.
pub type SynthFactory = Box<dyn FnOnce() -> Result<Box<dyn SpeechSynthesizer>> + Send>;

/// Deferred constructor for a capture backend.
pub type CaptureFactory = Box<dyn FnOnce() -> Result<Box<dyn VoiceCapture>> + Send>;

/// The synthesizer backend compiled into this build, if any.
pub fn default_synth_factory() -> SynthFactory {
    #[cfg(feature = "speech-output")]
    {
        Box::new(|| {
            let synth = native::NativeSynth::new()?;
            Ok(Box::new(synth) as Box<dyn SpeechSynthesizer>)
        })
    }

    #[cfg(not(feature = "speech-output"))]
    {
        Box::new(|| {
            Err(AskpodError::SynthError(
                "No speech output backend compiled in".to_string(),
            ))
        })
    }
}

/// The capture backend compiled into this build, if any.
pub fn default_capture_factory(config: CaptureConfig) -> CaptureFactory {
    #[cfg(feature = "voice-input")]
    {
        Box::new(move || {
            let capture = whisper::WhisperCapture::new(config)?;
            Ok(Box::new(capture) as Box<dyn VoiceCapture>)
        })
    }

    #[cfg(not(feature = "voice-input"))]
    {
        let _ = config;
        Box::new(|| {
            Err(AskpodError::CaptureError(
                "No voice capture backend compiled in".to_string(),
            ))
        })
    }
}
