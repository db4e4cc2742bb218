//! Sample Context - 多语言预览样本规则
//!
//! - 每种语言一条固定的示例句子
//! - 存储 key 由语言和音色 ID 唯一确定，重复生成会覆盖同一对象

use std::collections::HashMap;

use super::voice::{LanguageCode, VoiceId};

/// 预览样本的内容类型
pub const SAMPLE_CONTENT_TYPE: &str = "audio/mpeg";

/// 生成样本的存储 key: `voice-samples/<language>/<voiceId>.mp3`
pub fn sample_storage_key(language: &LanguageCode, voice_id: &VoiceId) -> String {
    format!("voice-samples/{}/{}.mp3", language.as_str(), voice_id.as_str())
}

/// 语言 -> 示例句子
#[derive(Debug, Clone, Default)]
pub struct SampleTexts {
    texts: HashMap<String, String>,
}

impl SampleTexts {
    pub fn new<K, V>(texts: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let texts = texts
            .into_iter()
            .map(|(lang, text)| (normalize_key(&lang.into()), text.into()))
            .filter(|(_, text)| !text.trim().is_empty())
            .collect();
        Self { texts }
    }

    /// 先按完整标签查找，再回退到主语言子标签（`pt-BR` -> `pt`）
    pub fn lookup(&self, language: &LanguageCode) -> Option<&str> {
        self.texts
            .get(&language.normalized())
            .or_else(|| self.texts.get(&language.primary_subtag()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

fn normalize_key(lang: &str) -> String {
    lang.trim().replace('_', "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_is_deterministic() {
        let lang = LanguageCode::new("es").unwrap();
        let id = VoiceId::new("abc").unwrap();
        assert_eq!(sample_storage_key(&lang, &id), "voice-samples/es/abc.mp3");
        assert_eq!(sample_storage_key(&lang, &id), sample_storage_key(&lang, &id));
    }

    #[test]
    fn test_lookup_falls_back_to_primary_subtag() {
        let texts = SampleTexts::new([("pt", "Olá"), ("pt-BR", "Oi"), ("fr", "Bonjour")]);
        assert_eq!(texts.lookup(&LanguageCode::new("pt_BR").unwrap()), Some("Oi"));
        assert_eq!(texts.lookup(&LanguageCode::new("pt-PT").unwrap()), Some("Olá"));
        assert_eq!(texts.lookup(&LanguageCode::new("FR").unwrap()), Some("Bonjour"));
        assert_eq!(texts.lookup(&LanguageCode::new("de").unwrap()), None);
    }

    #[test]
    fn test_blank_texts_are_dropped() {
        let texts = SampleTexts::new([("de", "  ")]);
        assert!(texts.is_empty());
    }
}
