/*!
 * Provider configuration module
 *
 * This module holds the per-service configuration records, the closed
 * enumeration of service kinds, and the configuration owner that publishes
 * active-provider changes to the dispatcher.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use crate::prompts::{default_prompt_sets, PromptSet};

/// Service kind discriminator
///
/// Never changes after construction; capability (single-shot vs streaming) is
/// implied by the kind, not probed at runtime.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Baidu Fanyi REST API (signed query string)
    #[default]
    Baidu,
    // @provider: Tencent TMT (SDK-style signed call)
    Tencent,
    // @provider: Caiyun Lingocloud (token header, JSON body)
    Caiyun,
    // @provider: Google Gemini (streaming chat)
    Gemini,
    // @provider: OpenAI-compatible chat completions (streaming SSE)
    OpenAi,
}

impl ProviderKind {
    // @returns: Capitalized service name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Baidu => "Baidu Translate",
            Self::Tencent => "Tencent TMT",
            Self::Caiyun => "Caiyun Lingocloud",
            Self::Gemini => "Gemini",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Whether this kind delivers results incrementally
    ///
    /// Streaming kinds implement `translate_streaming`; the others implement
    /// `translate`. Callers pick the method from this flag.
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Gemini | Self::OpenAi)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Baidu => "baidu",
            Self::Tencent => "tencent",
            Self::Caiyun => "caiyun",
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        };
        write!(f, "{}", tag)
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "baidu" => Ok(Self::Baidu),
            "tencent" => Ok(Self::Tencent),
            "caiyun" => Ok(Self::Caiyun),
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            _ => Err(anyhow!("Invalid provider kind: {}", s)),
        }
    }
}

/// Baidu Fanyi configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BaiduConfig {
    // @field: Stable unique identity
    pub id: Uuid,

    // @field: Display name
    #[serde(default = "BaiduConfig::default_name")]
    pub name: String,

    // @field: Icon tag for the configuration UI
    #[serde(default)]
    pub icon: String,

    // @field: Enablement flag
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // @field: Endpoint URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    // @field: Application id used in the request signature
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app_id: String,

    // @field: Application key used in the request signature
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub app_key: String,
}

impl BaiduConfig {
    fn default_name() -> String {
        "Baidu Translate".to_string()
    }
}

impl Default for BaiduConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(),
            icon: "baidu".to_string(),
            enabled: true,
            url: "https://fanyi-api.baidu.com/api/trans/vip/translate".to_string(),
            app_id: String::new(),
            app_key: String::new(),
        }
    }
}

/// Tencent TMT configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TencentConfig {
    // @field: Stable unique identity
    pub id: Uuid,

    // @field: Display name
    #[serde(default = "TencentConfig::default_name")]
    pub name: String,

    // @field: Icon tag for the configuration UI
    #[serde(default)]
    pub icon: String,

    // @field: Enablement flag
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // @field: Endpoint URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    // @field: SecretId for the signed call
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_id: String,

    // @field: SecretKey for the signed call
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret_key: String,

    // @field: Service region, e.g. "ap-shanghai"
    #[serde(default = "TencentConfig::default_region")]
    pub region: String,

    // @field: Project id tunable
    #[serde(default)]
    pub project_id: i64,
}

impl TencentConfig {
    fn default_name() -> String {
        "Tencent TMT".to_string()
    }

    fn default_region() -> String {
        "ap-shanghai".to_string()
    }
}

impl Default for TencentConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(),
            icon: "tencent".to_string(),
            enabled: true,
            url: "https://tmt.tencentcloudapi.com".to_string(),
            secret_id: String::new(),
            secret_key: String::new(),
            region: Self::default_region(),
            project_id: 0,
        }
    }
}

/// Caiyun Lingocloud configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaiyunConfig {
    // @field: Stable unique identity
    pub id: Uuid,

    // @field: Display name
    #[serde(default = "CaiyunConfig::default_name")]
    pub name: String,

    // @field: Icon tag for the configuration UI
    #[serde(default)]
    pub icon: String,

    // @field: Enablement flag
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // @field: Endpoint URL
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    // @field: Access token sent in the X-Authorization header
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

impl CaiyunConfig {
    fn default_name() -> String {
        "Caiyun Lingocloud".to_string()
    }
}

impl Default for CaiyunConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(),
            icon: "caiyun".to_string(),
            enabled: true,
            url: "http://api.interpreter.caiyunai.com/v1/translator".to_string(),
            token: String::new(),
        }
    }
}

/// Gemini configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeminiConfig {
    // @field: Stable unique identity
    pub id: Uuid,

    // @field: Display name
    #[serde(default = "GeminiConfig::default_name")]
    pub name: String,

    // @field: Icon tag for the configuration UI
    #[serde(default)]
    pub icon: String,

    // @field: Enablement flag
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // @field: Endpoint URL; the streaming path is appended at call time
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    // @field: API key passed in the query string
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    // @field: Model name in the streaming path
    #[serde(default = "GeminiConfig::default_model")]
    pub model: String,

    // @field: Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Named prompt sets; exactly one is active
    #[serde(default = "default_prompt_sets")]
    pub prompt_sets: Vec<PromptSet>,
}

impl GeminiConfig {
    fn default_name() -> String {
        "Gemini".to_string()
    }

    fn default_model() -> String {
        "gemini-pro".to_string()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(),
            icon: "gemini".to_string(),
            enabled: true,
            url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: Self::default_model(),
            timeout_secs: default_timeout_secs(),
            prompt_sets: default_prompt_sets(),
        }
    }
}

/// OpenAI-compatible chat-completions configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OpenAiConfig {
    // @field: Stable unique identity
    pub id: Uuid,

    // @field: Display name
    #[serde(default = "OpenAiConfig::default_name")]
    pub name: String,

    // @field: Icon tag for the configuration UI
    #[serde(default)]
    pub icon: String,

    // @field: Enablement flag
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    // @field: Endpoint URL; the chat-completions path is appended at call time
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    // @field: Bearer token for the Authorization header
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    // @field: Model name in the request body
    #[serde(default = "OpenAiConfig::default_model")]
    pub model: String,

    // @field: Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Named prompt sets; exactly one is active
    #[serde(default = "default_prompt_sets")]
    pub prompt_sets: Vec<PromptSet>,
}

impl OpenAiConfig {
    fn default_name() -> String {
        "OpenAI".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(),
            icon: "openai".to_string(),
            enabled: true,
            url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: Self::default_model(),
            timeout_secs: default_timeout_secs(),
            prompt_sets: default_prompt_sets(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

/// Per-provider configuration, one variant per service kind
///
/// Each variant carries only the fields its service needs. `Clone` is fully
/// deep: a clone shares no mutable sub-objects (prompt sets included) with
/// the original.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "service_kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    Baidu(BaiduConfig),
    Tencent(TencentConfig),
    Caiyun(CaiyunConfig),
    Gemini(GeminiConfig),
    OpenAi(OpenAiConfig),
}

impl ProviderConfig {
    /// Service kind discriminator; fixed for the lifetime of the record
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Baidu(_) => ProviderKind::Baidu,
            Self::Tencent(_) => ProviderKind::Tencent,
            Self::Caiyun(_) => ProviderKind::Caiyun,
            Self::Gemini(_) => ProviderKind::Gemini,
            Self::OpenAi(_) => ProviderKind::OpenAi,
        }
    }

    /// Stable unique identity
    pub fn id(&self) -> Uuid {
        match self {
            Self::Baidu(c) => c.id,
            Self::Tencent(c) => c.id,
            Self::Caiyun(c) => c.id,
            Self::Gemini(c) => c.id,
            Self::OpenAi(c) => c.id,
        }
    }

    /// Display name shown in diagnostics and the configuration UI
    pub fn name(&self) -> &str {
        match self {
            Self::Baidu(c) => &c.name,
            Self::Tencent(c) => &c.name,
            Self::Caiyun(c) => &c.name,
            Self::Gemini(c) => &c.name,
            Self::OpenAi(c) => &c.name,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Self::Baidu(c) => c.enabled,
            Self::Tencent(c) => c.enabled,
            Self::Caiyun(c) => c.enabled,
            Self::Gemini(c) => c.enabled,
            Self::OpenAi(c) => c.enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::Baidu(c) => c.enabled = enabled,
            Self::Tencent(c) => c.enabled = enabled,
            Self::Caiyun(c) => c.enabled = enabled,
            Self::Gemini(c) => c.enabled = enabled,
            Self::OpenAi(c) => c.enabled = enabled,
        }
    }

    /// Clone this record under a fresh identity
    ///
    /// Plain `clone()` preserves identity; duplicating a service in the
    /// configuration UI regenerates it explicitly through this method.
    pub fn clone_with_new_identity(&self) -> Self {
        let mut copy = self.clone();
        let id = Uuid::new_v4();
        match &mut copy {
            Self::Baidu(c) => c.id = id,
            Self::Tencent(c) => c.id = id,
            Self::Caiyun(c) => c.id = id,
            Self::Gemini(c) => c.id = id,
            Self::OpenAi(c) => c.id = id,
        }
        copy
    }
}

/// Configuration owner for the provider list
///
/// The manager is the only collaborator that mutates `ProviderConfig`
/// records. It publishes "active provider changed" events over a watch
/// channel; the dispatcher subscribes at construction and reads cloned
/// snapshots, never the live records.
#[derive(Debug)]
pub struct ProviderManager {
    providers: Vec<ProviderConfig>,
    active_tx: watch::Sender<Option<ProviderConfig>>,
}

impl ProviderManager {
    /// Create an empty manager with no active provider
    pub fn new() -> Self {
        let (active_tx, _) = watch::channel(None);
        Self {
            providers: Vec::new(),
            active_tx,
        }
    }

    /// Create a manager pre-populated with one default record per kind
    pub fn with_defaults() -> Self {
        let mut manager = Self::new();
        manager.add(ProviderConfig::Baidu(BaiduConfig::default()));
        manager.add(ProviderConfig::Tencent(TencentConfig::default()));
        manager.add(ProviderConfig::Caiyun(CaiyunConfig::default()));
        manager.add(ProviderConfig::Gemini(GeminiConfig::default()));
        manager.add(ProviderConfig::OpenAi(OpenAiConfig::default()));
        manager
    }

    /// Subscribe to active-provider change notifications
    pub fn subscribe(&self) -> watch::Receiver<Option<ProviderConfig>> {
        self.active_tx.subscribe()
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    pub fn add(&mut self, config: ProviderConfig) {
        self.providers.push(config);
    }

    /// Remove a provider; deactivates it first when it is the active one
    pub fn remove(&mut self, id: Uuid) -> Option<ProviderConfig> {
        let index = self.providers.iter().position(|p| p.id() == id)?;
        if self.active_tx.borrow().as_ref().map(|p| p.id()) == Some(id) {
            self.active_tx.send_replace(None);
        }
        Some(self.providers.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Replace a record in place, republishing when it is the active one
    pub fn update(&mut self, config: ProviderConfig) -> Result<()> {
        let id = config.id();
        let slot = self
            .providers
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| anyhow!("Unknown provider id: {}", id))?;
        if slot.kind() != config.kind() {
            return Err(anyhow!(
                "Service kind of {} cannot change after construction",
                id
            ));
        }
        *slot = config;
        if self.active_tx.borrow().as_ref().map(|p| p.id()) == Some(id) {
            let snapshot = slot.clone();
            self.active_tx.send_replace(Some(snapshot));
        }
        Ok(())
    }

    /// Make the given provider the active one
    ///
    /// Exactly one provider is active at a time; it must be enabled.
    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        let config = self
            .get(id)
            .ok_or_else(|| anyhow!("Unknown provider id: {}", id))?;
        if !config.enabled() {
            return Err(anyhow!("Provider {} is disabled", config.name()));
        }
        let snapshot = config.clone();
        log::debug!("Active provider changed: {} {}", snapshot.id(), snapshot.name());
        self.active_tx.send_replace(Some(snapshot));
        Ok(())
    }

    /// A cloned snapshot of the active provider, if any
    pub fn active(&self) -> Option<ProviderConfig> {
        self.active_tx.borrow().clone()
    }
}

impl Default for ProviderManager {
    fn default() -> Self {
        Self::new()
    }
}
