/*!
 * Integration tests for provider API interactions
 *
 * Live tests are `#[ignore]` and only run when the matching credentials are
 * exported, e.g. `POLYTRANS_BAIDU_APP_ID` / `POLYTRANS_BAIDU_APP_KEY`:
 *
 * ```sh
 * cargo test --test main -- --ignored
 * ```
 */

use std::env;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use polytrans::app_config::{BaiduConfig, CaiyunConfig, ProviderConfig};
use polytrans::dispatcher::Dispatcher;
use polytrans::language::LanguageCode;
use polytrans::providers::baidu::BaiduTranslator;
use polytrans::providers::caiyun::CaiyunTranslator;
use polytrans::providers::Translator;
use polytrans::types::{TranslationRequest, TranslationResult};

use crate::common::mock_providers::MockEchoTranslator;

/// Test that an unconfigured provider surfaces a configuration error
/// without touching the network
#[tokio::test]
async fn test_baidu_translate_withNoCredentials_shouldReturnConfigurationError() {
    let mut config = BaiduConfig::default();
    config.app_id = env::var("POLYTRANS_UNSET_APP_ID").unwrap_or_default();
    config.app_key.clear();
    assert!(config.app_id.is_empty(), "expected empty credentials for test");

    let translator = BaiduTranslator::new(config);
    let request = TranslationRequest::new("hello", LanguageCode::Auto, LanguageCode::ZhCn);
    let result = translator.translate(&request, &CancellationToken::new()).await;
    assert!(result.is_err(), "empty credentials should return an error");
}

/// Test the dispatch path end to end against a mock provider
#[test]
fn test_dispatch_withMockProvider_shouldReturnNormalizedSuccess() {
    crate::common::init_logging();

    let (_tx, rx) = watch::channel(Some(ProviderConfig::Baidu(BaiduConfig::default())));
    let dispatcher = Arc::new(Dispatcher::with_factory(
        rx,
        Box::new(|_| Box::new(MockEchoTranslator::new())),
    ));

    let request = TranslationRequest::new("Hello, world!", LanguageCode::En, LanguageCode::Fr);
    let result = tokio_test::block_on(async { dispatcher.translate("main", &request).await });
    assert_eq!(result, TranslationResult::Success("Hello, world!".to_string()));
}

/// Live test against the Baidu endpoint; requires real credentials
#[tokio::test]
#[ignore = "requires POLYTRANS_BAIDU_APP_ID and POLYTRANS_BAIDU_APP_KEY"]
async fn test_baidu_translate_withLiveCredentials_shouldReturnChinese() {
    let app_id = env::var("POLYTRANS_BAIDU_APP_ID").unwrap_or_default();
    let app_key = env::var("POLYTRANS_BAIDU_APP_KEY").unwrap_or_default();
    if app_id.is_empty() || app_key.is_empty() {
        eprintln!("skipping live Baidu test, credentials not set");
        return;
    }

    let mut config = BaiduConfig::default();
    config.app_id = app_id;
    config.app_key = app_key;
    let translator = BaiduTranslator::new(config);

    let request = TranslationRequest::new("hello world", LanguageCode::En, LanguageCode::ZhCn);
    let result = translator
        .translate(&request, &CancellationToken::new())
        .await
        .expect("live translation");
    assert!(result.is_success(), "got: {result:?}");
    assert!(!result.text().unwrap_or_default().is_empty());
}

/// Live test against the Caiyun endpoint; requires a real token
#[tokio::test]
#[ignore = "requires POLYTRANS_CAIYUN_TOKEN"]
async fn test_caiyun_translate_withLiveToken_shouldReturnEnglish() {
    let token = env::var("POLYTRANS_CAIYUN_TOKEN").unwrap_or_default();
    if token.is_empty() {
        eprintln!("skipping live Caiyun test, token not set");
        return;
    }

    let mut config = CaiyunConfig::default();
    config.token = token;
    let translator = CaiyunTranslator::new(config);

    let request = TranslationRequest::new("你好，世界", LanguageCode::ZhCn, LanguageCode::En);
    let result = translator
        .translate(&request, &CancellationToken::new())
        .await
        .expect("live translation");
    assert!(result.is_success(), "got: {result:?}");
}
