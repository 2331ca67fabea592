pub mod config;
pub mod engine;
pub mod query;
pub mod results;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AskpodError {
    #[error("Engine request error: {0}")]
    EngineRequestError(String),

    #[error("Engine response error: {0}")]
    EngineResponseError(String),

    #[error("Voice capture error: {0}")]
    CaptureError(String),

    #[error("Speech output error: {0}")]
    SynthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl AskpodError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A failed request can simply be retried with the next question
            AskpodError::EngineRequestError(_) => true,
            AskpodError::EngineResponseError(_) => true,
            AskpodError::CaptureError(_) => true,
            AskpodError::SynthError(_) => true,
            AskpodError::ConfigError(_) => false,
            AskpodError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            AskpodError::EngineRequestError(_) | AskpodError::EngineResponseError(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            AskpodError::CaptureError(_) => "Voice recognition is not available.".to_string(),
            AskpodError::SynthError(_) => "Speech output is not available.".to_string(),
            AskpodError::ConfigError(_) => "Configuration error. Please check settings.".to_string(),
            AskpodError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AskpodError>;
