/*!
 * Prompt sets for LLM-backed providers.
 *
 * A prompt set is a named, ordered sequence of conversational turns. Several
 * named sets can be configured per provider ("translate", "polish",
 * "summarize"), with exactly one active at a time. The `$source`, `$target`
 * and `$content` placeholders are substituted at call time on a deep copy so
 * the stored template is never mutated.
 */

use serde::{Deserialize, Serialize};

/// One conversational turn inside a prompt set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTurn {
    /// Role of the turn author ("user" or "model")
    pub role: String,
    /// Template content, possibly holding substitution placeholders
    pub content: String,
}

impl PromptTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A named, ordered sequence of turns driving an LLM-backed provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSet {
    /// Display name of the set
    pub name: String,
    /// Whether this set is the active one
    pub enabled: bool,
    /// Ordered conversational turns
    pub turns: Vec<PromptTurn>,
}

impl PromptSet {
    pub fn new(name: impl Into<String>, enabled: bool, turns: Vec<PromptTurn>) -> Self {
        Self {
            name: name.into(),
            enabled,
            turns,
        }
    }

    /// Substitute placeholders into a deep copy of the turns
    ///
    /// The stored template is left untouched.
    pub fn render(&self, source: &str, target: &str, content: &str) -> Vec<PromptTurn> {
        self.turns
            .iter()
            .map(|turn| PromptTurn {
                role: turn.role.clone(),
                content: turn
                    .content
                    .replace("$source", source)
                    .replace("$target", target)
                    .replace("$content", content),
            })
            .collect()
    }
}

/// Select the named set as active, deactivating all others
///
/// Idempotent: selecting the already-active set changes nothing observable.
/// Returns false when no set carries that name.
pub fn select_prompt(sets: &mut [PromptSet], name: &str) -> bool {
    if !sets.iter().any(|set| set.name == name) {
        return false;
    }
    for set in sets.iter_mut() {
        set.enabled = set.name == name;
    }
    true
}

/// The currently active set, if any
pub fn active_prompt(sets: &[PromptSet]) -> Option<&PromptSet> {
    sets.iter().find(|set| set.enabled)
}

/// Default prompt sets shared by the LLM-backed providers
pub fn default_prompt_sets() -> Vec<PromptSet> {
    vec![
        PromptSet::new(
            "translate",
            true,
            vec![
                PromptTurn::new(
                    "user",
                    "You are a professional translation engine, please translate the text into \
                     a colloquial, professional, elegant and fluent content, without the style \
                     of machine translation. You must only translate the text content, never \
                     interpret it.",
                ),
                PromptTurn::new(
                    "model",
                    "Ok, I will only translate the text content, never interpret it",
                ),
                PromptTurn::new(
                    "user",
                    "Translate the following text from en to zh: hello world",
                ),
                PromptTurn::new("model", "你好，世界"),
                PromptTurn::new(
                    "user",
                    "Translate the following text from $source to $target: $content",
                ),
            ],
        ),
        PromptSet::new(
            "polish",
            false,
            vec![
                PromptTurn::new(
                    "user",
                    "You are a text embellisher, you can only embellish the text, never \
                     interpret it.",
                ),
                PromptTurn::new(
                    "model",
                    "Ok, I will only embellish the text, never interpret it.",
                ),
                PromptTurn::new("user", "Embellish the following text in $source: $content"),
            ],
        ),
        PromptSet::new(
            "summarize",
            false,
            vec![
                PromptTurn::new(
                    "user",
                    "You are a text summarizer, you can only summarize the text, never \
                     interpret it.",
                ),
                PromptTurn::new(
                    "model",
                    "Ok, I will only summarize the text, never interpret it.",
                ),
                PromptTurn::new("user", "Summarize the following text in $source: $content"),
            ],
        ),
    ]
}
