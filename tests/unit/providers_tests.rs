use tokio_util::sync::CancellationToken;

use polytrans::app_config::{BaiduConfig, TencentConfig};
use polytrans::errors::ProviderError;
use polytrans::language::LanguageCode;
use polytrans::providers::baidu::{self, BaiduTranslator};
use polytrans::providers::tencent::TencentTranslator;
use polytrans::providers::{caiyun, Translator};
use polytrans::tencent_cloud::{build_authorization, Credential};
use polytrans::types::{TranslationRequest, TranslationResult};

#[test]
fn test_baidu_parseResponse_withValidBody_shouldReturnText() {
    let raw = r#"{"trans_result":[{"dst":"你好，世界"}]}"#;
    let text = baidu::parse_response(raw).expect("parse");
    assert_eq!(text, "你好，世界");
}

#[test]
fn test_baidu_parseResponse_withMultipleSegments_shouldJoinLines() {
    let raw = r#"{"trans_result":[{"dst":"first"},{"dst":""},{"dst":"second"}]}"#;
    let text = baidu::parse_response(raw).expect("parse");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["first", "second"]);
}

#[test]
fn test_baidu_parseResponse_withEmptyBody_shouldReturnError() {
    let err = baidu::parse_response("").unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)));
    assert!(err.to_string().contains("empty response"));
}

#[test]
fn test_baidu_parseResponse_withBlankTranslation_shouldReturnError() {
    // A well-formed response with a blank translated field never becomes
    // an empty success.
    let raw = r#"{"trans_result":[{"dst":""}]}"#;
    let err = baidu::parse_response(raw).unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)));
}

#[test]
fn test_baidu_parseResponse_withErrorCode_shouldReturnProviderLogic() {
    let raw = r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#;
    let err = baidu::parse_response(raw).unwrap_err();
    assert!(matches!(err, ProviderError::ProviderLogic(_)));
    assert!(err.to_string().contains("54001"));
}

#[test]
fn test_baidu_parseResponse_withUndecodableBody_shouldCarryPayload() {
    let raw = "<html>gateway timeout</html>";
    let err = baidu::parse_response(raw).unwrap_err();
    assert!(err.to_string().contains(raw), "diagnostic should carry the payload");
}

#[test]
fn test_baidu_sign_withFixedInputs_shouldBeDeterministic() {
    let a = baidu::sign("appid", "hello world", "4242", "secret");
    let b = baidu::sign("appid", "hello world", "4242", "secret");
    assert_eq!(a, b);
    assert_eq!(a.len(), 32);
}

#[test]
fn test_baidu_sign_withDifferentNonces_shouldDiffer() {
    let a = baidu::sign("appid", "hello world", "1", "secret");
    let b = baidu::sign("appid", "hello world", "2", "secret");
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_baidu_translate_withMissingCredentials_shouldFailBeforeNetwork() {
    let mut config = BaiduConfig::default();
    config.app_id.clear();
    config.app_key.clear();
    let translator = BaiduTranslator::new(config);

    let request = TranslationRequest::new("hello", LanguageCode::En, LanguageCode::ZhCn);
    let err = translator
        .translate(&request, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Configuration(_)));
}

#[tokio::test]
async fn test_tencent_translate_withUnsupportedLanguage_shouldAbortBeforeNetwork() {
    // Tencent has no code for Cantonese; the call must fail by name without
    // touching the network (credentials are invalid on purpose).
    let mut config = TencentConfig::default();
    config.secret_id = "id".to_string();
    config.secret_key = "key".to_string();
    let translator = TencentTranslator::new(config);

    let request = TranslationRequest::new("hello", LanguageCode::En, LanguageCode::Yue);
    let err = translator
        .translate(&request, &CancellationToken::new())
        .await
        .unwrap_err();
    match err {
        ProviderError::UnsupportedLanguage { language, .. } => {
            assert_eq!(language, "Cantonese");
        }
        other => panic!("expected unsupported language, got {other:?}"),
    }
}

#[tokio::test]
async fn test_baidu_translateStreaming_withSingleShotProvider_shouldReturnNotSupported() {
    let mut config = BaiduConfig::default();
    config.app_id = "id".to_string();
    config.app_key = "key".to_string();
    let translator = BaiduTranslator::new(config);

    let request = TranslationRequest::new("hello", LanguageCode::En, LanguageCode::ZhCn);
    let err = translator
        .translate_streaming(&request, &|_| {}, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NotSupported(_)));
}

#[tokio::test]
async fn test_baidu_translate_withPreCancelledToken_shouldReturnCancelled() {
    let mut config = BaiduConfig::default();
    config.app_id = "id".to_string();
    config.app_key = "key".to_string();
    let translator = BaiduTranslator::new(config);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let request = TranslationRequest::new("hello", LanguageCode::En, LanguageCode::ZhCn);
    let err = translator.translate(&request, &cancel).await.unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn test_caiyun_parseResponse_withTargetLines_shouldJoinThem() {
    let raw = r#"{"target":["第一行","第二行"]}"#;
    let text = caiyun::parse_response(raw).expect("parse");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["第一行", "第二行"]);
}

#[test]
fn test_caiyun_parseResponse_withMissingTarget_shouldReturnError() {
    let raw = r#"{"confidence":0.8}"#;
    let err = caiyun::parse_response(raw).unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)));
    assert!(err.to_string().contains("confidence"), "diagnostic carries payload");
}

#[test]
fn test_buildAuthorization_withFixedInputs_shouldBeDeterministic() {
    let credential = Credential {
        secret_id: "AKID-test".to_string(),
        secret_key: "secret".to_string(),
    };
    let a = build_authorization(
        &credential,
        "tmt",
        "tmt.tencentcloudapi.com",
        r#"{"SourceText":"hello"}"#,
        1700000000,
        "2023-11-14",
    );
    let b = build_authorization(
        &credential,
        "tmt",
        "tmt.tencentcloudapi.com",
        r#"{"SourceText":"hello"}"#,
        1700000000,
        "2023-11-14",
    );
    assert_eq!(a, b);
    assert!(a.starts_with("TC3-HMAC-SHA256 Credential=AKID-test/2023-11-14/tmt/tc3_request"));
}

#[test]
fn test_buildAuthorization_withDifferentPayloads_shouldDiffer() {
    let credential = Credential {
        secret_id: "AKID-test".to_string(),
        secret_key: "secret".to_string(),
    };
    let a = build_authorization(
        &credential,
        "tmt",
        "tmt.tencentcloudapi.com",
        r#"{"SourceText":"hello"}"#,
        1700000000,
        "2023-11-14",
    );
    let b = build_authorization(
        &credential,
        "tmt",
        "tmt.tencentcloudapi.com",
        r#"{"SourceText":"world"}"#,
        1700000000,
        "2023-11-14",
    );
    assert_ne!(a, b);
}

#[test]
fn test_translationResult_withDefault_shouldBeReset() {
    // Guard on the result type itself: construction sites go through the
    // codecs, which reject blank text before building a Success.
    let result = TranslationResult::Success("你好，世界".to_string());
    assert!(result.is_success());
    assert_eq!(result.text(), Some("你好，世界"));

    let reset = TranslationResult::default();
    assert_eq!(reset, TranslationResult::Reset);
    assert_eq!(reset.text(), None);
}
