use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::app_config::{ProviderKind, TencentConfig};
use crate::errors::ProviderError;
use crate::language::LanguageCode;
use crate::providers::{convert_lang, Translator};
use crate::tencent_cloud::{ClientProfile, CloudClient, Credential, HttpProfile};
use crate::types::{TranslationRequest, TranslationResult};

const ACTION: &str = "TextTranslate";
const VERSION: &str = "2018-03-21";

/// Tencent TMT client
///
/// SDK-mediated single-shot provider: credential object, client options,
/// client, call — see `tencent_cloud` for the signed call path.
#[derive(Debug)]
pub struct TencentTranslator {
    config: TencentConfig,
}

/// Vendor code table
///
/// <https://cloud.tencent.com/document/product/551/15619>
pub fn vendor_code(lang: LanguageCode) -> Option<&'static str> {
    match lang {
        LanguageCode::Auto => Some("auto"),
        LanguageCode::ZhCn => Some("zh"),
        LanguageCode::ZhTw => Some("zh-TW"),
        LanguageCode::Yue => None,
        LanguageCode::En => Some("en"),
        LanguageCode::Ja => Some("ja"),
        LanguageCode::Ko => Some("ko"),
        LanguageCode::Fr => Some("fr"),
        LanguageCode::Es => Some("es"),
        LanguageCode::Ru => Some("ru"),
        LanguageCode::De => Some("de"),
        LanguageCode::It => Some("it"),
        LanguageCode::Tr => Some("tr"),
        LanguageCode::PtPt => Some("pt"),
        LanguageCode::PtBr => Some("pt"),
        LanguageCode::Vi => Some("vi"),
        LanguageCode::Id => Some("id"),
        LanguageCode::Th => Some("th"),
        LanguageCode::Ms => Some("ms"),
        LanguageCode::Ar => Some("ar"),
        LanguageCode::Hi => Some("hi"),
        LanguageCode::MnCy => None,
        LanguageCode::MnMo => None,
        LanguageCode::Km => None,
        LanguageCode::NbNo => None,
        LanguageCode::NnNo => None,
        LanguageCode::Fa => None,
        LanguageCode::Sv => None,
        LanguageCode::Pl => None,
        LanguageCode::Nl => None,
        LanguageCode::Uk => None,
    }
}

impl TencentTranslator {
    pub fn new(config: TencentConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.config.url.is_empty()
            || self.config.secret_id.is_empty()
            || self.config.secret_key.is_empty()
        {
            return Err(ProviderError::Configuration(
                "Tencent endpoint URL, secret id and secret key are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Translator for TencentTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Tencent
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

        let source = convert_lang(ProviderKind::Tencent, request.source)?;
        let target = convert_lang(ProviderKind::Tencent, request.target)?;

        let credential = Credential {
            secret_id: self.config.secret_id.clone(),
            secret_key: self.config.secret_key.clone(),
        };
        let profile = ClientProfile {
            http_profile: HttpProfile::new(self.config.url.clone()),
        };
        let client = CloudClient::new(credential, self.config.region.clone(), profile, "tmt");

        let payload = json!({
            "SourceText": request.text,
            "Source": source,
            "Target": target,
            "ProjectId": self.config.project_id,
        });

        let response = client.call(ACTION, VERSION, &payload, cancel).await?;
        let text = response
            .get("TargetText")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::Parse(format!(
                "no translation in response: {response}"
            )));
        }
        Ok(TranslationResult::Success(text.to_string()))
    }
}
