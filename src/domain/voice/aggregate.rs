//! Voice Context - Aggregate Root

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{LanguageCode, VoiceId};

/// Voice 聚合根 - 目录中的一个合成音色
///
/// 不变量:
/// - `id` 创建后不可修改
/// - `preview_url` 只能由样本生成流程写入，且指向与 `language` 一致的样本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    id: VoiceId,
    character: String,
    provider_voice_id: String,
    language: LanguageCode,
    #[serde(default)]
    preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// 目录作者写入的其他字段，原样保留
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Voice {
    /// 创建新音色
    pub fn new(
        id: VoiceId,
        character: impl Into<String>,
        provider_voice_id: impl Into<String>,
        language: LanguageCode,
    ) -> Self {
        Self {
            id,
            character: character.into(),
            provider_voice_id: provider_voice_id.into(),
            language,
            preview_url: None,
            alias: None,
            tags: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// 记录新生成的预览地址
    pub fn set_preview_url(&mut self, url: impl Into<String>) {
        self.preview_url = Some(url.into());
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = Some(alias.into());
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = Some(tags);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    // Getters
    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn provider_voice_id(&self) -> &str {
        &self.provider_voice_id
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview_url.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
