/*!
 * SDK-style call layer for Tencent Cloud services.
 *
 * Mirrors the vendor SDK layering: a credential object, client options, a
 * client, then the call. The wire protocol is a TC3-HMAC-SHA256 signed JSON
 * POST; both the TMT translator and the OCR engine go through this module.
 */

use chrono::Utc;
use log::debug;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;

use crate::errors::ProviderError;
use crate::transport;

/// Account credential pair
#[derive(Debug, Clone)]
pub struct Credential {
    pub secret_id: String,
    pub secret_key: String,
}

/// Low-level HTTP options
#[derive(Debug, Clone)]
pub struct HttpProfile {
    /// Endpoint host, scheme stripped, e.g. "tmt.tencentcloudapi.com"
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpProfile {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().replace("https://", "").replace("http://", ""),
            timeout_secs: 10,
        }
    }
}

/// Client options wrapping the HTTP profile
#[derive(Debug, Clone)]
pub struct ClientProfile {
    pub http_profile: HttpProfile,
}

/// Signed-call client for one Tencent Cloud service
#[derive(Debug)]
pub struct CloudClient {
    credential: Credential,
    region: String,
    profile: ClientProfile,
    /// Short service tag used in the credential scope, e.g. "tmt" or "ocr"
    service: &'static str,
    http: reqwest::Client,
}

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host";

fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

// HMAC-SHA256 with the fixed 64-byte SHA-256 block size.
fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut key_block = [0u8; 64];
    if key.len() > 64 {
        key_block[..32].copy_from_slice(&Sha256::digest(key));
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }
    let mut ipad = [0x36u8; 64];
    let mut opad = [0x5cu8; 64];
    for i in 0..64 {
        ipad[i] ^= key_block[i];
        opad[i] ^= key_block[i];
    }
    let inner = Sha256::new().chain_update(ipad).chain_update(data).finalize();
    let outer = Sha256::new().chain_update(opad).chain_update(inner).finalize();
    outer.into()
}

/// Compute the TC3 authorization header for one request
///
/// Deterministic for a fixed (credential, host, payload, timestamp) tuple;
/// the date scope comes from the same timestamp.
pub fn build_authorization(
    credential: &Credential,
    service: &str,
    host: &str,
    payload: &str,
    timestamp: i64,
    date: &str,
) -> String {
    // The content-type value must match what the HTTP layer actually sends.
    let canonical_request = format!(
        "POST\n/\n\ncontent-type:application/json\nhost:{host}\n\n{SIGNED_HEADERS}\n{}",
        sha256_hex(payload.as_bytes())
    );
    let scope = format!("{date}/{service}/tc3_request");
    let string_to_sign = format!(
        "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(
        format!("TC3{}", credential.secret_key).as_bytes(),
        date.as_bytes(),
    );
    let secret_service = hmac_sha256(&secret_date, service.as_bytes());
    let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
    let signature = hmac_sha256(&secret_signing, string_to_sign.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>();

    format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        credential.secret_id
    )
}

impl CloudClient {
    pub fn new(
        credential: Credential,
        region: impl Into<String>,
        profile: ClientProfile,
        service: &'static str,
    ) -> Self {
        let timeout = profile.http_profile.timeout_secs;
        Self {
            credential,
            region: region.into(),
            profile,
            service,
            http: transport::http_client(timeout),
        }
    }

    /// Perform one signed action call and return the inner `Response` object
    ///
    /// A well-formed body carrying an `Error` member is surfaced as a
    /// provider-logic failure with the vendor code and message.
    pub async fn call(
        &self,
        action: &str,
        version: &str,
        payload: &Value,
        cancel: &CancellationToken,
    ) -> Result<Value, ProviderError> {
        let host = &self.profile.http_profile.endpoint;
        let body = payload.to_string();
        let now = Utc::now();
        let timestamp = now.timestamp();
        let date = now.format("%Y-%m-%d").to_string();

        let authorization =
            build_authorization(&self.credential, self.service, host, &body, timestamp, &date);

        let headers = [
            ("Authorization", authorization),
            ("Host", host.clone()),
            ("X-TC-Action", action.to_string()),
            ("X-TC-Version", version.to_string()),
            ("X-TC-Timestamp", timestamp.to_string()),
            ("X-TC-Region", self.region.clone()),
        ];

        debug!("Tencent Cloud call {}::{}", self.service, action);
        let url = format!("https://{host}");
        let raw = transport::post_json(&self.http, &url, payload, &headers, cancel).await?;
        if raw.trim().is_empty() {
            return Err(ProviderError::Parse("empty response from service".to_string()));
        }

        let parsed: Value = serde_json::from_str(&raw)
            .map_err(|e| ProviderError::Parse(format!("deserialization failed: {e}: {raw}")))?;
        let response = parsed
            .get("Response")
            .cloned()
            .ok_or_else(|| ProviderError::Parse(format!("missing Response member: {raw}")))?;

        if let Some(error) = response.get("Error") {
            let code = error.get("Code").and_then(Value::as_str).unwrap_or("unknown");
            let message = error.get("Message").and_then(Value::as_str).unwrap_or("");
            return Err(ProviderError::ProviderLogic(format!("{code}: {message}")));
        }
        Ok(response)
    }
}
