/*!
 * OCR engine contract and normalized result types.
 *
 * OCR backends sit behind the same uniform-contract pattern as the
 * translation providers: each engine owns its language table, validates its
 * configuration before any network call, and a failing engine surfaces a
 * normalized unsuccessful result instead of leaking vendor error shapes.
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug as FmtDebug;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::errors::ProviderError;
use crate::language::LanguageCode;

pub mod tencent;

/// OCR engine kind discriminator
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OcrKind {
    /// Tencent cloud OCR over the signed call path
    #[default]
    Tencent,
}

impl OcrKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tencent => "Tencent OCR",
        }
    }
}

/// One point of a region's bounding polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// One recognized text region with its bounding polygon
///
/// `box_points` may be empty when a backend returns no positional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OcrRegion {
    pub box_points: Vec<Point>,
    pub text: String,
}

/// Normalized OCR outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OcrResult {
    pub success: bool,
    pub error_message: Option<String>,
    pub text: String,
    pub regions: Vec<OcrRegion>,
}

impl OcrResult {
    pub fn success(text: impl Into<String>, regions: Vec<OcrRegion>) -> Self {
        Self {
            success: true,
            error_message: None,
            text: text.into(),
            regions,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Common trait for all OCR engines
#[async_trait]
pub trait OcrEngine: Send + Sync + FmtDebug {
    /// Engine kind discriminator
    fn kind(&self) -> OcrKind;

    /// Stable identity of the configuration this engine was built from
    fn identity(&self) -> Uuid;

    /// Display name used in normalized failure messages
    fn display_name(&self) -> String;

    /// Recognize text in the raw image bytes
    async fn recognize(
        &self,
        image: &[u8],
        lang: LanguageCode,
        cancel: &CancellationToken,
    ) -> Result<OcrResult, ProviderError>;
}

/// Invoke an engine and normalize any error into an unsuccessful result
///
/// Cancellation yields an empty, non-successful result with no error message
/// so the caller does not display a spurious diagnostic for a user abort.
pub async fn recognize_with(
    engine: &dyn OcrEngine,
    image: &[u8],
    lang: LanguageCode,
    cancel: &CancellationToken,
) -> OcrResult {
    match engine.recognize(image, lang, cancel).await {
        Ok(result) => result,
        Err(ProviderError::Cancelled) => {
            debug!("OCR call on {} cancelled", engine.display_name());
            OcrResult::default()
        }
        Err(e) => OcrResult::failure(format!("[{}] {}", engine.display_name(), e)),
    }
}
