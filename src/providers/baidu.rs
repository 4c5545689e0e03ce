use async_trait::async_trait;
use log::debug;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app_config::{BaiduConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::providers::{convert_lang, Translator};
use crate::transport;
use crate::types::{TranslationRequest, TranslationResult, LINE_SEPARATOR};

/// Baidu Fanyi client
///
/// Single-shot REST provider. Requests go out as a GET with a signed query
/// string; the signature is `md5(app_id + text + salt + app_key)` with a
/// fresh salt per call to satisfy the vendor's replay-protection contract.
#[derive(Debug)]
pub struct BaiduTranslator {
    config: BaiduConfig,
    client: Client,
}

/// One translated segment in a Baidu response
#[derive(Debug, Deserialize)]
pub struct BaiduSegment {
    /// Translated text for this segment
    #[serde(default)]
    pub dst: String,
}

/// Baidu response body
///
/// Application-level failures come back well-formed with `error_code` set
/// instead of `trans_result`.
#[derive(Debug, Deserialize)]
pub struct BaiduResponse {
    #[serde(default)]
    pub trans_result: Option<Vec<BaiduSegment>>,
    #[serde(default)]
    pub error_code: Option<serde_json::Value>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

/// Compute the request signature for a (app_id, text, salt, app_key) tuple
///
/// Deterministic for a fixed tuple; the salt is what varies between calls.
pub fn sign(app_id: &str, text: &str, salt: &str, app_key: &str) -> String {
    format!("{:x}", md5::compute(format!("{app_id}{text}{salt}{app_key}")))
}

/// Vendor code table
///
/// <https://fanyi-api.baidu.com/product/113>
pub fn vendor_code(lang: LanguageCode) -> Option<&'static str> {
    match lang {
        LanguageCode::Auto => Some("auto"),
        LanguageCode::ZhCn => Some("zh"),
        LanguageCode::ZhTw => Some("cht"),
        LanguageCode::Yue => Some("yue"),
        LanguageCode::En => Some("en"),
        LanguageCode::Ja => Some("jp"),
        LanguageCode::Ko => Some("kor"),
        LanguageCode::Fr => Some("fra"),
        LanguageCode::Es => Some("spa"),
        LanguageCode::Ru => Some("ru"),
        LanguageCode::De => Some("de"),
        LanguageCode::It => Some("it"),
        LanguageCode::Tr => Some("tr"),
        LanguageCode::PtPt => Some("pt"),
        LanguageCode::PtBr => Some("pot"),
        LanguageCode::Vi => Some("vie"),
        LanguageCode::Id => Some("id"),
        LanguageCode::Th => Some("th"),
        LanguageCode::Ms => Some("may"),
        LanguageCode::Ar => Some("ar"),
        LanguageCode::Hi => Some("hi"),
        LanguageCode::MnCy => None,
        LanguageCode::MnMo => None,
        LanguageCode::Km => Some("hkm"),
        LanguageCode::NbNo => Some("nob"),
        LanguageCode::NnNo => Some("nno"),
        LanguageCode::Fa => Some("per"),
        LanguageCode::Sv => Some("swe"),
        LanguageCode::Pl => Some("pl"),
        LanguageCode::Nl => Some("nl"),
        LanguageCode::Uk => Some("ukr"),
    }
}

/// Parse a raw Baidu response body into translated text
///
/// Blank or missing translation text is a failure, never an empty success.
pub fn parse_response(raw: &str) -> Result<String, ProviderError> {
    if raw.trim().is_empty() {
        return Err(ProviderError::Parse("empty response from service".to_string()));
    }

    let response: BaiduResponse = serde_json::from_str(raw)
        .map_err(|e| ProviderError::Parse(format!("deserialization failed: {e}: {raw}")))?;

    if let Some(code) = response.error_code {
        let msg = response.error_msg.unwrap_or_default();
        return Err(ProviderError::ProviderLogic(format!("{code} {msg}: {raw}")));
    }

    let segments = response.trans_result.unwrap_or_default();
    let text = segments
        .iter()
        .filter(|seg| !seg.dst.is_empty())
        .map(|seg| seg.dst.as_str())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR);

    if text.trim().is_empty() {
        return Err(ProviderError::Parse(format!("no translation in response: {raw}")));
    }
    Ok(text)
}

impl BaiduTranslator {
    pub fn new(config: BaiduConfig) -> Self {
        Self {
            client: transport::http_client(10),
            config,
        }
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.config.url.is_empty() || self.config.app_id.is_empty() || self.config.app_key.is_empty()
        {
            return Err(ProviderError::Configuration(
                "Baidu endpoint URL, app id and app key are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for BaiduTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Baidu
    }

    fn identity(&self) -> Uuid {
        self.config.id
    }

    fn display_name(&self) -> String {
        self.config.name.clone()
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationResult, ProviderError> {
        self.validate()?;

        let source = convert_lang(ProviderKind::Baidu, request.source)?;
        let target = convert_lang(ProviderKind::Baidu, request.target)?;

        // Fresh nonce per call; never derived from request content alone.
        let salt = rand::rng().random_range(0..100_000).to_string();
        let signature = sign(&self.config.app_id, &request.text, &salt, &self.config.app_key);

        let params = [
            ("q", request.text.clone()),
            ("from", source.to_string()),
            ("to", target.to_string()),
            ("appid", self.config.app_id.clone()),
            ("salt", salt),
            ("sign", signature),
        ];

        debug!("Baidu translate {} -> {}", source, target);
        let raw = transport::get_with_query(&self.client, &self.config.url, &params, cancel).await?;
        parse_response(&raw).map(TranslationResult::Success)
    }
}
