//! Metadata Context - 外部音色元数据合并
//!
//! 外部元数据表以角色名为键（大小写敏感、完全匹配），
//! 只覆盖记录中出现的字段

use std::collections::BTreeMap;

use serde::Deserialize;

use super::voice::VoiceCatalog;

/// 外部元数据记录，字段缺失表示不覆盖
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetadataRecord {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// character -> MetadataRecord
pub type MetadataTable = BTreeMap<String, MetadataRecord>;

/// 合并结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// 命中外部记录的音色数
    pub matched: usize,
    /// 未命中、保持原样的音色数
    pub unmatched: usize,
}

/// 将外部元数据合并进目录
pub fn merge_metadata(catalog: &mut VoiceCatalog, table: &MetadataTable) -> MergeReport {
    let mut report = MergeReport::default();

    for voice in catalog.iter_mut() {
        let Some(record) = table.get(voice.character()) else {
            report.unmatched += 1;
            continue;
        };

        if let Some(alias) = &record.alias {
            voice.set_alias(alias.clone());
        }
        if let Some(tags) = &record.tags {
            voice.set_tags(tags.clone());
        }
        if let Some(description) = &record.description {
            voice.set_description(description.clone());
        }
        report.matched += 1;
    }

    report
}
