/*!
 * # polytrans
 *
 * A Rust library that dispatches translation and OCR requests to
 * interchangeable third-party cloud services behind one uniform contract.
 *
 * ## Features
 *
 * - Single-shot REST providers (Baidu, Caiyun) and an SDK-style signed call
 *   path (Tencent TMT)
 * - Streaming LLM providers (Gemini, OpenAI-compatible) with incremental
 *   chunk delivery and cooperative cancellation
 * - A shared language vocabulary with per-provider vendor-code tables and
 *   fail-fast unsupported-language checks
 * - Named prompt sets for LLM providers with deep-copy template substitution
 * - A dispatcher with at-most-one-call-per-surface semantics and normalized
 *   failure results
 * - An OCR engine contract with bounding-region results
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Provider configuration records and the configuration owner
 * - `language`: The shared language enumeration
 * - `prompts`: Prompt sets for LLM-backed providers
 * - `providers`: One adapter per translation service:
 *   - `providers::baidu`: Signed REST query API
 *   - `providers::tencent`: SDK-style signed call
 *   - `providers::caiyun`: Token-header JSON API
 *   - `providers::gemini`: Streaming chat endpoint
 *   - `providers::openai`: Streaming SSE chat completions
 * - `tencent_cloud`: Shared TC3-signed call layer
 * - `transport`: Cancellable HTTP call primitives
 * - `dispatcher`: Active-provider selection and call orchestration
 * - `ocr`: OCR engine contract and the Tencent OCR engine
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod dispatcher;
pub mod errors;
pub mod language;
pub mod ocr;
pub mod prompts;
pub mod providers;
pub mod tencent_cloud;
pub mod transport;
pub mod types;

// Re-export main types for easier usage
pub use app_config::{ProviderConfig, ProviderKind, ProviderManager};
pub use dispatcher::Dispatcher;
pub use errors::{AppError, DispatchError, ProviderError};
pub use language::LanguageCode;
pub use ocr::{OcrEngine, OcrResult};
pub use providers::{build_translator, vendor_code, Translator};
pub use types::{TranslationRequest, TranslationResult};
