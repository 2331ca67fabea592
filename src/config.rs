//! Application configuration
//!
//! Provides centralized configuration for the engine client and the voice
//! capture backend. Everything has code-level defaults; there are no config
//! files and no persisted state.

use std::path::PathBuf;
use std::time::Duration;

/// Application id used when none is configured. The hosted service accepts
/// it for a limited number of requests per day.
pub const DEMO_APP_ID: &str = "DEMO";

/// Configuration for the query engine client
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Application id issued by the service
    pub app_id: String,

    /// Base URL of the service
    pub base_url: String,

    /// Answer format requested from the service
    pub format: String,

    /// Timeout for one query round trip
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_id: DEMO_APP_ID.to_string(),
            base_url: "https://api.wolframalpha.com".to_string(),
            format: "plaintext".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl EngineConfig {
    /// Set the application id
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Set the service base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the query timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for the voice capture backend
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Path to the speech recognition model file
    pub model_path: PathBuf,

    /// Language to transcribe (None for auto-detection)
    pub language: Option<String>,

    /// Length of one modal capture window in seconds
    pub record_secs: f32,

    /// Number of threads to use for transcription
    pub n_threads: i32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/ggml-base.en.bin"),
            language: Some("en".to_string()),
            record_secs: 5.0,
            n_threads: 4,
        }
    }
}

impl CaptureConfig {
    /// Set the recognition model path
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set the capture window length
    pub fn with_record_secs(mut self, secs: f32) -> Self {
        self.record_secs = secs;
        self
    }
}

/// Complete application configuration
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub capture: CaptureConfig,
}

impl AppConfig {
    /// Set the engine configuration
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the capture configuration
    pub fn with_capture(mut self, capture: CaptureConfig) -> Self {
        self.capture = capture;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.engine.app_id.is_empty() {
            return Err("Engine application id is required".to_string());
        }

        if self.engine.base_url.is_empty() {
            return Err("Engine base URL is required".to_string());
        }

        if cfg!(feature = "voice-input") && !self.capture.model_path.exists() {
            return Err(format!(
                "Speech recognition model not found: {:?}",
                self.capture.model_path
            ));
        }

        Ok(())
    }
}
