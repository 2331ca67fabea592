//! User-facing strings, centralized for localization

pub const APP_TITLE: &str = "Askpod";
pub const APP_SUBTITLE: &str = "Computational Knowledge Assistant";

pub const INPUT_HINT: &str = "Ask anything...";
pub const CAPTURE_PROMPT: &str = "Speak your question";

pub const EMPTY_STATE_TITLE: &str = "What do you want to know?";
pub const EMPTY_STATE_HINT: &str =
    "Type a question below or use the microphone, then tap an answer to hear it aloud.";

pub const ERROR_NOT_UNDERSTOOD: &str = "I don't understand your question";
pub const ERROR_SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";

pub const TOOLTIP_STOP_SPEECH: &str = "Stop speech";
pub const TOOLTIP_CLEAR: &str = "Clear results and input";
pub const TOOLTIP_VOICE_INPUT: &str = "Ask by voice";
pub const TOOLTIP_SEND: &str = "Send question (Enter)";

pub const NOTICE_DISMISS: &str = "OK";
