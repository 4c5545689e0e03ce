use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

/// Platform line separator used when joining multi-line translation output
///
/// Translation text can legitimately contain embedded lines, so joins always
/// go through this constant rather than a bare `\n`.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// A normalized translation request, immutable per call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Source text to translate
    pub text: String,
    /// Source language from the shared vocabulary
    pub source: LanguageCode,
    /// Target language from the shared vocabulary
    pub target: LanguageCode,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: LanguageCode, target: LanguageCode) -> Self {
        Self {
            text: text.into(),
            source,
            target,
        }
    }
}

/// Outcome of a translation call
///
/// A result is never partially both success and failure. `Reset` is the idle
/// placeholder state before any call completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum TranslationResult {
    /// Completed translation text
    Success(String),
    /// Human-readable failure diagnostic
    Fail(String),
    /// Idle placeholder before any call completes
    #[default]
    Reset,
}

impl TranslationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// The translated text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }
}

/// Callback receiving already-decoded text fragments from a streaming call
///
/// Invoked zero or more times in arrival order; never after cancellation is
/// observed or after the call returns.
pub type ChunkHandler<'a> = &'a (dyn Fn(String) + Send + Sync);
