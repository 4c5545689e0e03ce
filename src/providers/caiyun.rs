use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app_config::{CaiyunConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::providers::{convert_lang, Translator};
use crate::transport;
use crate::types::{TranslationRequest, TranslationResult, LINE_SEPARATOR};

/// Caiyun Lingocloud client
///
/// Single-shot REST provider: JSON body with the source split line by line,
/// token auth in the `X-Authorization` header.
#[derive(Debug)]
pub struct CaiyunTranslator {
    config: CaiyunConfig,
    client: Client,
}

/// Vendor code table
///
/// <https://docs.caiyunapp.com/blog/2018/09/03/lingocloud-api/>
pub fn vendor_code(lang: LanguageCode) -> Option<&'static str> {
    match lang {
        LanguageCode::Auto => Some("auto"),
        LanguageCode::ZhCn => Some("zh"),
        LanguageCode::ZhTw => Some("zh"),
        LanguageCode::Yue => Some("zh"),
        LanguageCode::En => Some("en"),
        LanguageCode::Ja => Some("ja"),
        _ => None,
    }
}

/// Parse a raw Caiyun response body into translated text
pub fn parse_response(raw: &str) -> Result<String, ProviderError> {
    if raw.trim().is_empty() {
        return Err(ProviderError::Parse("empty response from service".to_string()));
    }

    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| ProviderError::Parse(format!("deserialization failed: {e}: {raw}")))?;
    let target = parsed
        .get("target")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Parse(format!("no target in response: {raw}")))?;

    let text = target
        .iter()
        .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR);

    if text.trim().is_empty() {
        return Err(ProviderError::Parse(format!("no translation in response: {raw}")));
    }
    Ok(text)
}

impl CaiyunTranslator {
    pub fn new(config: CaiyunConfig) -> Self {
        Self {
            client: transport::http_client(10),
            config,
        }
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.config.url.is_empty() || self.config.token.is_empty() {
            return Err(ProviderError::Configuration(
                "Caiyun endpoint URL and token are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for CaiyunTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Caiyun
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

        let source = convert_lang(ProviderKind::Caiyun, request.source)?;
        let target = convert_lang(ProviderKind::Caiyun, request.target)?;

        let body = json!({
            "source": request.text.split(LINE_SEPARATOR).collect::<Vec<_>>(),
            "trans_type": format!("{source}2{target}"),
            "request_id": "polytrans",
            "detect": true,
        });
        let headers = [("X-Authorization", format!("token {}", self.config.token))];

        debug!("Caiyun translate {} -> {}", source, target);
        let raw =
            transport::post_json(&self.client, &self.config.url, &body, &headers, cancel).await?;
        parse_response(&raw).map(TranslationResult::Success)
    }
}
