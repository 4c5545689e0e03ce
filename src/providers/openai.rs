use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app_config::{OpenAiConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::prompts::active_prompt;
use crate::providers::{convert_lang, Translator};
use crate::transport;
use crate::types::{ChunkHandler, TranslationRequest};

/// OpenAI-compatible chat-completions client
///
/// Incremental-delivery provider over SSE `data:` lines. Network fragments
/// may split an event at any byte, so lines are reassembled across fragments
/// before parsing; the concatenation of delivered chunks reconstructs the
/// full text.
#[derive(Debug)]
pub struct OpenAiTranslator {
    config: OpenAiConfig,
    client: Client,
}

/// One parsed SSE line
#[derive(Debug, PartialEq, Eq)]
pub enum SseLine {
    /// A decoded text delta to deliver
    Chunk(String),
    /// The `[DONE]` terminator
    Done,
    /// Anything else: keep-alives, malformed or partial events
    Skip,
}

/// Parse one complete SSE line into a delivery decision
pub fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.trim().strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim();
    if data == "[DONE]" {
        return SseLine::Done;
    }
    let Ok(event) = serde_json::from_str::<Value>(data) else {
        return SseLine::Skip;
    };
    match event["choices"][0]["delta"]["content"].as_str() {
        Some(content) if !content.is_empty() => SseLine::Chunk(content.to_string()),
        _ => SseLine::Skip,
    }
}

/// Reassembles SSE lines from arbitrarily split network fragments
#[derive(Debug, Default)]
pub struct SseAssembler {
    buffer: String,
    done: bool,
}

impl SseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw fragment, returning the decoded chunks it completed
    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        if self.done {
            return chunks;
        }
        self.buffer.push_str(fragment);
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            match parse_sse_line(&line) {
                SseLine::Chunk(text) => chunks.push(text),
                SseLine::Done => {
                    self.done = true;
                    break;
                }
                SseLine::Skip => {}
            }
        }
        chunks
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Vendor code table; same ISO-style vocabulary as Gemini
pub fn vendor_code(lang: LanguageCode) -> Option<&'static str> {
    super::gemini::vendor_code(lang)
}

impl OpenAiTranslator {
    pub fn new(config: OpenAiConfig) -> Self {
        let timeout = config.timeout_secs;
        Self {
            client: transport::http_client(timeout),
            config,
        }
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.config.url.is_empty() || self.config.api_key.is_empty() {
            return Err(ProviderError::Configuration(
                "OpenAI endpoint URL and API key are required".to_string(),
            ));
        }
        Ok(())
    }

    fn build_url(&self) -> String {
        let base = self.config.url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/v1/chat/completions")
        }
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn identity(&self) -> Uuid {
        self.config.id
    }

    fn display_name(&self) -> String {
        self.config.name.clone()
    }

    async fn translate_streaming(
        &self,
        request: &TranslationRequest,
        on_chunk: ChunkHandler<'_>,
        cancel: &CancellationToken,
    ) -> Result<(), ProviderError> {
        self.validate()?;

        let source = convert_lang(ProviderKind::OpenAi, request.source)?;
        let target = convert_lang(ProviderKind::OpenAi, request.target)?;

        let prompt = active_prompt(&self.config.prompt_sets).ok_or_else(|| {
            ProviderError::Configuration("no active prompt set is configured".to_string())
        })?;
        let turns = prompt.render(source, target, &request.text);

        // Prompt sets use the "model" role; chat completions call it "assistant".
        let messages = turns
            .iter()
            .map(|turn| {
                let role = if turn.role == "model" { "assistant" } else { &turn.role };
                json!({ "role": role, "content": turn.content })
            })
            .collect::<Vec<_>>();

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "stream": true,
        });
        let headers = [("Authorization", format!("Bearer {}", self.config.api_key))];

        let url = self.build_url();
        debug!("OpenAI streaming translate {} -> {}", source, target);

        let mut assembler = SseAssembler::new();
        let mut deliver = |fragment: &str| {
            for chunk in assembler.push(fragment) {
                on_chunk(chunk);
            }
        };
        transport::post_streaming(&self.client, &url, &body, &headers, &mut deliver, cancel).await
    }
}
