//! Response data model for the query service
//!
//! The service answers one free-text question with an ordered list of
//! "pods" (titled answer sections), each holding one or more subpods whose
//! content elements are typed: plain text, images, sounds. Only the plain
//! text variant is consumed downstream; everything else is carried as an
//! opaque tag and dropped at extraction.

use serde::Deserialize;

/// The envelope the service wraps every JSON response in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub queryresult: QueryResult,
}

/// One settled response from the query service.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub error: ErrorField,

    #[serde(default)]
    pub pods: Vec<Pod>,
}

impl QueryResult {
    /// Collapse the envelope flags into the three outcomes the app
    /// distinguishes. The error flag wins over everything else; a response
    /// that is neither an error nor a success means the service did not
    /// understand the question.
    pub fn into_outcome(self) -> QueryOutcome {
        if self.error.is_error() {
            let msg = self
                .error
                .message()
                .unwrap_or("The query service reported an error")
                .to_string();
            QueryOutcome::ServiceError(msg)
        } else if !self.success {
            QueryOutcome::NotUnderstood
        } else {
            QueryOutcome::Success(self.pods)
        }
    }
}

/// What one query means to the rest of the application.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The service understood the question and returned answer sections.
    Success(Vec<Pod>),

    /// The service rejected the query and provided a human-readable reason.
    ServiceError(String),

    /// Neither an error nor a success: the question was not understood.
    NotUnderstood,
}

/// The service overloads its `error` field: boolean `false` on the happy
/// path, an object with a message when something went wrong.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    Flag(bool),
    Info(ErrorInfo),
}

impl Default for ErrorField {
    fn default() -> Self {
        ErrorField::Flag(false)
    }
}

impl ErrorField {
    pub fn is_error(&self) -> bool {
        match self {
            ErrorField::Flag(flag) => *flag,
            ErrorField::Info(_) => true,
        }
    }

    /// The service-provided message, if there is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorField::Flag(_) => None,
            ErrorField::Info(info) if info.msg.is_empty() => None,
            ErrorField::Info(info) => Some(&info.msg),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    #[serde(default)]
    pub msg: String,
}

/// One titled answer section.
#[derive(Debug, Clone, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub error: ErrorField,

    #[serde(default)]
    pub subpods: Vec<Subpod>,
}

impl Pod {
    pub fn is_error(&self) -> bool {
        self.error.is_error()
    }
}

/// A sub-section of a pod holding typed content elements in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawSubpod")]
pub struct Subpod {
    pub contents: Vec<ContentElement>,
}

/// A typed content fragment. Everything that is not plain text is kept only
/// as a kind tag so extraction can skip it without knowing its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentElement {
    PlainText(String),
    Other(String),
}

/// Wire shape of a subpod: the JSON variant of the API exposes content
/// elements as named optional fields rather than a typed list.
#[derive(Debug, Deserialize)]
struct RawSubpod {
    #[serde(default)]
    plaintext: Option<String>,

    #[serde(default)]
    img: Option<serde_json::Value>,

    #[serde(default)]
    sound: Option<serde_json::Value>,
}

impl From<RawSubpod> for Subpod {
    fn from(raw: RawSubpod) -> Self {
        let mut contents = Vec::new();
        if let Some(text) = raw.plaintext {
            contents.push(ContentElement::PlainText(text));
        }
        if raw.img.is_some() {
            contents.push(ContentElement::Other("img".to_string()));
        }
        if raw.sound.is_some() {
            contents.push(ContentElement::Other("sound".to_string()));
        }
        Self { contents }
    }
}
