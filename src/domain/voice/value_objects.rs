//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色唯一标识（目录内稳定不变）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("音色 ID 不能为空");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VoiceId {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VoiceId> for String {
    fn from(id: VoiceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语言标签（类 BCP-47，如 `es`、`pt-BR`、`en_GB`）
///
/// 原样保存，比较时只看主标签且忽略大小写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Result<Self, &'static str> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("语言代码不能为空");
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 主语言子标签（小写），`pt-BR` -> `pt`
    pub fn primary_subtag(&self) -> String {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }

    /// 小写并统一分隔符为 `-`，用于查表
    pub fn normalized(&self) -> String {
        self.0.trim().replace('_', "-").to_lowercase()
    }

    /// 是否为 `base` 语言本身或其地区变体（`en-GB` 是 `en` 的变体）
    pub fn is_variant_of(&self, base: &LanguageCode) -> bool {
        self.primary_subtag() == base.primary_subtag()
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// 默认基础语言 `en`
impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// TTS 音色参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// 稳定度 (0.0 - 1.0)
    pub stability: f32,
    /// 相似度增强 (0.0 - 1.0)
    pub similarity_boost: f32,
    /// 风格强度 (0.0 - 1.0)
    pub style: f32,
    /// 是否启用说话人增强
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

impl VoiceSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..=1.0).contains(&self.stability) {
            return Err("stability 必须在 0.0 到 1.0 之间");
        }
        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err("similarity_boost 必须在 0.0 到 1.0 之间");
        }
        if !(0.0..=1.0).contains(&self.style) {
            return Err("style 必须在 0.0 到 1.0 之间");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::new(code).unwrap()
    }

    #[test]
    fn test_regional_variants_match_base() {
        let base = lang("en");
        assert!(lang("en").is_variant_of(&base));
        assert!(lang("en-GB").is_variant_of(&base));
        assert!(lang("EN_us").is_variant_of(&base));
        assert!(!lang("es").is_variant_of(&base));
        assert!(!lang("eng").is_variant_of(&base));
    }

    #[test]
    fn test_normalized() {
        assert_eq!(lang("pt_BR").normalized(), "pt-br");
        assert_eq!(lang("pt-BR").primary_subtag(), "pt");
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert!(VoiceId::new("  ").is_err());
        assert!(LanguageCode::new("").is_err());
    }

    #[test]
    fn test_settings_validation() {
        assert!(VoiceSettings::default().validate().is_ok());
        let settings = VoiceSettings {
            stability: 1.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
