use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::ocr::{OcrEngine, OcrKind, OcrRegion, OcrResult, Point};
use crate::tencent_cloud::{ClientProfile, CloudClient, Credential, HttpProfile};
use crate::types::LINE_SEPARATOR;

const ACTION: &str = "GeneralBasicOCR";
const VERSION: &str = "2018-11-19";

/// Tencent OCR configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TencentOcrConfig {
    pub id: Uuid,
    #[serde(default = "TencentOcrConfig::default_name")]
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_key: String,
    #[serde(default = "TencentOcrConfig::default_region")]
    pub region: String,
}

impl TencentOcrConfig {
    fn default_name() -> String {
        "Tencent OCR".to_string()
    }

    fn default_region() -> String {
        "ap-shanghai".to_string()
    }
}

fn default_enabled() -> bool {
    true
}

impl Default for TencentOcrConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(),
            enabled: true,
            url: "https://ocr.tencentcloudapi.com".to_string(),
            secret_id: String::new(),
            secret_key: String::new(),
            region: Self::default_region(),
        }
    }
}

/// Tencent cloud OCR engine
#[derive(Debug)]
pub struct TencentOcr {
    config: TencentOcrConfig,
}

/// Language hint table for the recognition call
pub fn vendor_code(lang: LanguageCode) -> Option<&'static str> {
    match lang {
        LanguageCode::Auto => Some("auto"),
        LanguageCode::ZhCn => Some("zh"),
        LanguageCode::ZhTw => Some("zh_rare"),
        LanguageCode::En => Some("auto"),
        LanguageCode::Ja => Some("jap"),
        LanguageCode::Ko => Some("kor"),
        _ => None,
    }
}

/// Map a `TextDetections` payload into the normalized result shape
pub fn parse_detections(response: &Value) -> Result<OcrResult, ProviderError> {
    let detections = response
        .get("TextDetections")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ProviderError::Parse(format!("missing TextDetections member: {response}"))
        })?;

    let mut lines = Vec::new();
    let mut regions = Vec::new();
    for detection in detections {
        let text = detection
            .get("DetectedText")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let box_points = detection
            .get("Polygon")
            .and_then(Value::as_array)
            .map(|points| {
                points
                    .iter()
                    .map(|p| Point {
                        x: p.get("X").and_then(Value::as_i64).unwrap_or(0) as i32,
                        y: p.get("Y").and_then(Value::as_i64).unwrap_or(0) as i32,
                    })
                    .collect()
            })
            .unwrap_or_default();
        if !text.is_empty() {
            lines.push(text.clone());
        }
        regions.push(OcrRegion { box_points, text });
    }

    Ok(OcrResult::success(lines.join(LINE_SEPARATOR), regions))
}

impl TencentOcr {
    pub fn new(config: TencentOcrConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.config.url.is_empty()
            || self.config.secret_id.is_empty()
            || self.config.secret_key.is_empty()
        {
            return Err(ProviderError::Configuration(
                "Tencent OCR endpoint URL, secret id and secret key are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl OcrEngine for TencentOcr {
    fn kind(&self) -> OcrKind {
        OcrKind::Tencent
    }

    fn identity(&self) -> Uuid {
        self.config.id
    }

    fn display_name(&self) -> String {
        self.config.name.clone()
    }

    async fn recognize(
        &self,
        image: &[u8],
        lang: LanguageCode,
        cancel: &CancellationToken,
    ) -> Result<OcrResult, ProviderError> {
        self.validate()?;

        let language = vendor_code(lang).ok_or_else(|| ProviderError::UnsupportedLanguage {
            service: OcrKind::Tencent.display_name().to_string(),
            language: lang.display_name().to_string(),
        })?;

        let credential = Credential {
            secret_id: self.config.secret_id.clone(),
            secret_key: self.config.secret_key.clone(),
        };
        let profile = ClientProfile {
            http_profile: HttpProfile::new(self.config.url.clone()),
        };
        let client = CloudClient::new(credential, self.config.region.clone(), profile, "ocr");

        let payload = json!({
            "ImageBase64": BASE64.encode(image),
            "LanguageType": language,
        });

        let response = client.call(ACTION, VERSION, &payload, cancel).await?;
        parse_detections(&response)
    }
}
