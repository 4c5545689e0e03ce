use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Shared language vocabulary for all providers
///
/// This is the only language enumeration callers use. Each provider owns a
/// mapping from these values to its own vendor code strings; see the
/// `vendor_code` tables in the provider modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LanguageCode {
    /// Automatic detection
    #[default]
    Auto,
    /// Simplified Chinese
    ZhCn,
    /// Traditional Chinese
    ZhTw,
    /// Cantonese
    Yue,
    /// English
    En,
    /// Japanese
    Ja,
    /// Korean
    Ko,
    /// French
    Fr,
    /// Spanish
    Es,
    /// Russian
    Ru,
    /// German
    De,
    /// Italian
    It,
    /// Turkish
    Tr,
    /// Portuguese (Portugal)
    PtPt,
    /// Portuguese (Brazil)
    PtBr,
    /// Vietnamese
    Vi,
    /// Indonesian
    Id,
    /// Thai
    Th,
    /// Malay
    Ms,
    /// Arabic
    Ar,
    /// Hindi
    Hi,
    /// Mongolian (Cyrillic)
    MnCy,
    /// Mongolian (traditional script)
    MnMo,
    /// Khmer
    Km,
    /// Norwegian Bokmål
    NbNo,
    /// Norwegian Nynorsk
    NnNo,
    /// Persian
    Fa,
    /// Swedish
    Sv,
    /// Polish
    Pl,
    /// Dutch
    Nl,
    /// Ukrainian
    Uk,
}

impl LanguageCode {
    /// Every language in the shared vocabulary, in declaration order
    pub const ALL: [LanguageCode; 31] = [
        Self::Auto,
        Self::ZhCn,
        Self::ZhTw,
        Self::Yue,
        Self::En,
        Self::Ja,
        Self::Ko,
        Self::Fr,
        Self::Es,
        Self::Ru,
        Self::De,
        Self::It,
        Self::Tr,
        Self::PtPt,
        Self::PtBr,
        Self::Vi,
        Self::Id,
        Self::Th,
        Self::Ms,
        Self::Ar,
        Self::Hi,
        Self::MnCy,
        Self::MnMo,
        Self::Km,
        Self::NbNo,
        Self::NnNo,
        Self::Fa,
        Self::Sv,
        Self::Pl,
        Self::Nl,
        Self::Uk,
    ];

    /// Human-readable name used in error messages and the configuration UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::ZhCn => "Chinese (Simplified)",
            Self::ZhTw => "Chinese (Traditional)",
            Self::Yue => "Cantonese",
            Self::En => "English",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
            Self::Fr => "French",
            Self::Es => "Spanish",
            Self::Ru => "Russian",
            Self::De => "German",
            Self::It => "Italian",
            Self::Tr => "Turkish",
            Self::PtPt => "Portuguese (Portugal)",
            Self::PtBr => "Portuguese (Brazil)",
            Self::Vi => "Vietnamese",
            Self::Id => "Indonesian",
            Self::Th => "Thai",
            Self::Ms => "Malay",
            Self::Ar => "Arabic",
            Self::Hi => "Hindi",
            Self::MnCy => "Mongolian (Cyrillic)",
            Self::MnMo => "Mongolian (Traditional)",
            Self::Km => "Khmer",
            Self::NbNo => "Norwegian Bokmal",
            Self::NnNo => "Norwegian Nynorsk",
            Self::Fa => "Persian",
            Self::Sv => "Swedish",
            Self::Pl => "Polish",
            Self::Nl => "Dutch",
            Self::Uk => "Ukrainian",
        }
    }

    /// Lowercase identifier matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::ZhCn => "zh_cn",
            Self::ZhTw => "zh_tw",
            Self::Yue => "yue",
            Self::En => "en",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Fr => "fr",
            Self::Es => "es",
            Self::Ru => "ru",
            Self::De => "de",
            Self::It => "it",
            Self::Tr => "tr",
            Self::PtPt => "pt_pt",
            Self::PtBr => "pt_br",
            Self::Vi => "vi",
            Self::Id => "id",
            Self::Th => "th",
            Self::Ms => "ms",
            Self::Ar => "ar",
            Self::Hi => "hi",
            Self::MnCy => "mn_cy",
            Self::MnMo => "mn_mo",
            Self::Km => "km",
            Self::NbNo => "nb_no",
            Self::NnNo => "nn_no",
            Self::Fa => "fa",
            Self::Sv => "sv",
            Self::Pl => "pl",
            Self::Nl => "nl",
            Self::Uk => "uk",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .find(|lang| lang.as_str() == normalized)
            .copied()
            .ok_or_else(|| anyhow!("Unknown language code: {}", s))
    }
}
