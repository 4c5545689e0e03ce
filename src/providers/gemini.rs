use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

use crate::app_config::{GeminiConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::prompts::active_prompt;
use crate::providers::{convert_lang, Translator};
use crate::transport;
use crate::types::{ChunkHandler, TranslationRequest};

/// Gemini streaming chat client
///
/// Incremental-delivery provider. The response is read progressively and
/// each network fragment goes through pattern extraction; fragments that do
/// not carry a text field are skipped, since a fragment boundary may split a
/// token. The concatenation of delivered chunks reconstructs the full text.
#[derive(Debug)]
pub struct GeminiTranslator {
    config: GeminiConfig,
    client: Client,
}

// The quoted value of a "text" field inside a raw streamed fragment.
static TEXT_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""text":\s*"((?:[^"\\]|\\.)*)""#).expect("valid pattern"));

/// Extract the user-visible text from one raw streamed fragment
///
/// A single network read can coalesce several streamed elements, so every
/// text field in the fragment is extracted, in order. Fragments that do not
/// match the expected shape yield nothing; they are skipped, not fatal.
pub fn extract_stream_text(fragment: &str) -> Vec<String> {
    TEXT_FIELD
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .collect()
}

// Un-escape the JSON string markers the pattern extraction leaves behind.
// Single left-to-right pass so a literal backslash never re-triggers on the
// character that follows it.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Vendor code table (ISO 639-1 style, every language mapped)
pub fn vendor_code(lang: LanguageCode) -> Option<&'static str> {
    match lang {
        LanguageCode::Auto => Some("auto"),
        LanguageCode::ZhCn => Some("zh-cn"),
        LanguageCode::ZhTw => Some("zh-tw"),
        LanguageCode::Yue => Some("yue"),
        LanguageCode::En => Some("en"),
        LanguageCode::Ja => Some("ja"),
        LanguageCode::Ko => Some("ko"),
        LanguageCode::Fr => Some("fr"),
        LanguageCode::Es => Some("es"),
        LanguageCode::Ru => Some("ru"),
        LanguageCode::De => Some("de"),
        LanguageCode::It => Some("it"),
        LanguageCode::Tr => Some("tr"),
        LanguageCode::PtPt => Some("pt_pt"),
        LanguageCode::PtBr => Some("pt_br"),
        LanguageCode::Vi => Some("vi"),
        LanguageCode::Id => Some("id"),
        LanguageCode::Th => Some("th"),
        LanguageCode::Ms => Some("ms"),
        LanguageCode::Ar => Some("ar"),
        LanguageCode::Hi => Some("hi"),
        LanguageCode::MnCy => Some("mn_cy"),
        LanguageCode::MnMo => Some("mn_mo"),
        LanguageCode::Km => Some("km"),
        LanguageCode::NbNo => Some("nb_no"),
        LanguageCode::NnNo => Some("nn_no"),
        LanguageCode::Fa => Some("fa"),
        LanguageCode::Sv => Some("sv"),
        LanguageCode::Pl => Some("pl"),
        LanguageCode::Nl => Some("nl"),
        LanguageCode::Uk => Some("uk"),
    }
}

impl GeminiTranslator {
    pub fn new(config: GeminiConfig) -> Self {
        let timeout = config.timeout_secs;
        Self {
            client: transport::http_client(timeout),
            config,
        }
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.config.url.is_empty() || self.config.api_key.is_empty() {
            return Err(ProviderError::Configuration(
                "Gemini endpoint URL and API key are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Endpoint with the streaming path forced and the key in the query
    fn build_url(&self) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.url)
            .map_err(|e| ProviderError::Configuration(format!("invalid endpoint URL: {e}")))?;
        let path = format!("/v1beta/models/{}:streamGenerateContent", self.config.model);
        if !url.path().ends_with(&path) {
            url.set_path(&path);
        }
        url.set_query(Some(&format!("key={}", self.config.api_key)));
        Ok(url)
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
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

        let source = convert_lang(ProviderKind::Gemini, request.source)?;
        let target = convert_lang(ProviderKind::Gemini, request.target)?;

        let prompt = active_prompt(&self.config.prompt_sets).ok_or_else(|| {
            ProviderError::Configuration("no active prompt set is configured".to_string())
        })?;
        // Substitution happens on a deep copy; the stored template is untouched.
        let turns = prompt.render(source, target, &request.text);

        let body = json!({
            "contents": turns.iter().map(|turn| json!({
                "role": turn.role,
                "parts": [ { "text": turn.content } ],
            })).collect::<Vec<_>>(),
        });

        let url = self.build_url()?;
        debug!("Gemini streaming translate {} -> {}", source, target);

        let mut deliver = |fragment: &str| {
            for text in extract_stream_text(fragment) {
                on_chunk(text);
            }
        };
        transport::post_streaming(&self.client, url.as_str(), &body, &[], &mut deliver, cancel)
            .await
    }
}
