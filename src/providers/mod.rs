/*!
 * Provider implementations for the translation services.
 *
 * This module contains the uniform contract every backend implements and one
 * adapter per service kind:
 * - Baidu: REST GET with a signed query string
 * - Tencent: SDK-style signed call path
 * - Caiyun: REST POST with token header auth
 * - Gemini: streaming chat endpoint
 * - OpenAI: streaming SSE chat completions
 */

use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::types::{ChunkHandler, TranslationRequest, TranslationResult};

/// Common trait for all translation providers
///
/// Exactly one of the two translate methods is meaningfully implemented per
/// provider kind; the other returns a not-supported error. Callers pick the
/// method from `ProviderKind::is_streaming`, never by probing.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Service kind of this provider
    fn kind(&self) -> ProviderKind;

    /// Stable identity of the configuration this provider was built from
    fn identity(&self) -> Uuid;

    /// Display name used in normalized failure messages
    fn display_name(&self) -> String;

    /// Translate and return one complete payload
    async fn translate(
        &self,
        _request: &TranslationRequest,
        _cancel: &CancellationToken,
    ) -> Result<TranslationResult, ProviderError> {
        Err(ProviderError::NotSupported(format!(
            "{} only returns incremental results; use the streaming call",
            self.display_name()
        )))
    }

    /// Translate with incremental delivery
    ///
    /// `on_chunk` is invoked zero or more times with already-decoded text
    /// fragments, in arrival order, and never after cancellation is observed
    /// or after the call returns.
    async fn translate_streaming(
        &self,
        _request: &TranslationRequest,
        _on_chunk: ChunkHandler<'_>,
        _cancel: &CancellationToken,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::NotSupported(format!(
            "{} does not deliver incremental results",
            self.display_name()
        )))
    }
}

/// Convert a shared language value to the vendor code a service expects
///
/// Each provider owns a total mapping; `None` means the service has no code
/// for that language and the call must fail before any network request.
pub fn vendor_code(kind: ProviderKind, lang: LanguageCode) -> Option<&'static str> {
    match kind {
        ProviderKind::Baidu => baidu::vendor_code(lang),
        ProviderKind::Tencent => tencent::vendor_code(lang),
        ProviderKind::Caiyun => caiyun::vendor_code(lang),
        ProviderKind::Gemini => gemini::vendor_code(lang),
        ProviderKind::OpenAi => openai::vendor_code(lang),
    }
}

/// Resolve a vendor code or fail fast with a descriptive error
pub(crate) fn convert_lang(
    kind: ProviderKind,
    lang: LanguageCode,
) -> Result<&'static str, ProviderError> {
    vendor_code(kind, lang).ok_or_else(|| ProviderError::UnsupportedLanguage {
        service: kind.display_name().to_string(),
        language: lang.display_name().to_string(),
    })
}

/// Build a translator from a cloned snapshot of the configuration
///
/// The snapshot makes the in-flight call independent of later configuration
/// edits; the dispatcher never hands out live records.
pub fn build_translator(config: &ProviderConfig) -> Box<dyn Translator> {
    match config {
        ProviderConfig::Baidu(c) => Box::new(baidu::BaiduTranslator::new(c.clone())),
        ProviderConfig::Tencent(c) => Box::new(tencent::TencentTranslator::new(c.clone())),
        ProviderConfig::Caiyun(c) => Box::new(caiyun::CaiyunTranslator::new(c.clone())),
        ProviderConfig::Gemini(c) => Box::new(gemini::GeminiTranslator::new(c.clone())),
        ProviderConfig::OpenAi(c) => Box::new(openai::OpenAiTranslator::new(c.clone())),
    }
}

pub mod baidu;
pub mod caiyun;
pub mod gemini;
pub mod openai;
pub mod tencent;
