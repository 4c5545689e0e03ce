use std::str::FromStr;

use polytrans::app_config::ProviderKind;
use polytrans::language::LanguageCode;
use polytrans::providers::vendor_code;

#[test]
fn test_vendor_tables_withEveryLanguage_shouldBeTotal() {
    // Every (provider, language) pair must resolve to either a vendor code
    // or an explicit unsupported answer; the lookup itself never panics.
    let kinds = [
        ProviderKind::Baidu,
        ProviderKind::Tencent,
        ProviderKind::Caiyun,
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
    ];
    for kind in kinds {
        for lang in LanguageCode::ALL {
            let code = vendor_code(kind, lang);
            if let Some(code) = code {
                assert!(!code.is_empty(), "{kind} maps {lang} to an empty code");
            }
        }
    }
}

#[test]
fn test_baidu_vendor_code_withKnownLanguages_shouldMatchTable() {
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::ZhCn), Some("zh"));
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::ZhTw), Some("cht"));
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::Ja), Some("jp"));
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::Ko), Some("kor"));
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::Fr), Some("fra"));
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::PtBr), Some("pot"));
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::MnCy), None);
    assert_eq!(vendor_code(ProviderKind::Baidu, LanguageCode::MnMo), None);
}

#[test]
fn test_tencent_vendor_code_withUnsupportedLanguages_shouldReturnNone() {
    // Cantonese and the long tail of European languages have no Tencent code.
    let unsupported = [
        LanguageCode::Yue,
        LanguageCode::MnCy,
        LanguageCode::MnMo,
        LanguageCode::Km,
        LanguageCode::NbNo,
        LanguageCode::NnNo,
        LanguageCode::Fa,
        LanguageCode::Sv,
        LanguageCode::Pl,
        LanguageCode::Nl,
        LanguageCode::Uk,
    ];
    for lang in unsupported {
        assert_eq!(vendor_code(ProviderKind::Tencent, lang), None);
    }
    assert_eq!(vendor_code(ProviderKind::Tencent, LanguageCode::ZhTw), Some("zh-TW"));
}

#[test]
fn test_caiyun_vendor_code_withChineseVariants_shouldFoldToZh() {
    // Caiyun has one Chinese code; all variants fold into it.
    assert_eq!(vendor_code(ProviderKind::Caiyun, LanguageCode::ZhCn), Some("zh"));
    assert_eq!(vendor_code(ProviderKind::Caiyun, LanguageCode::ZhTw), Some("zh"));
    assert_eq!(vendor_code(ProviderKind::Caiyun, LanguageCode::Yue), Some("zh"));
    assert_eq!(vendor_code(ProviderKind::Caiyun, LanguageCode::Ko), None);
}

#[test]
fn test_gemini_vendor_code_withEveryLanguage_shouldReturnSome() {
    for lang in LanguageCode::ALL {
        assert!(
            vendor_code(ProviderKind::Gemini, lang).is_some(),
            "Gemini should map {lang}"
        );
    }
}

#[test]
fn test_language_code_withParseAndDisplay_shouldRoundTrip() {
    for lang in LanguageCode::ALL {
        let parsed = LanguageCode::from_str(lang.as_str()).expect("round trip");
        assert_eq!(parsed, lang);
    }
    // Dashes normalize to the underscore form.
    assert_eq!(LanguageCode::from_str("zh-cn").unwrap(), LanguageCode::ZhCn);
    assert_eq!(LanguageCode::from_str("PT-BR").unwrap(), LanguageCode::PtBr);
    assert!(LanguageCode::from_str("klingon").is_err());
}

#[test]
fn test_display_name_withEveryLanguage_shouldBeNonEmpty() {
    for lang in LanguageCode::ALL {
        assert!(!lang.display_name().is_empty());
    }
}
