//! JSON Metadata Source
//!
//! 外部元数据文件: `{ "<character>": { "alias": ..., "tags": [...], "description": ... } }`
//! 任何读取或解析错误都会让整次合并失败

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::application::ports::{MetadataError, MetadataSourcePort};
use crate::domain::MetadataTable;

/// JSON 文件元数据来源
pub struct JsonMetadataSource {
    path: PathBuf,
}

impl JsonMetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetadataSourcePort for JsonMetadataSource {
    async fn load(&self) -> Result<MetadataTable, MetadataError> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|e| MetadataError::IoError(format!("{}: {}", self.path.display(), e)))?;

        let table: MetadataTable = serde_json::from_slice(&raw).map_err(|e| {
            MetadataError::ParseError(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), entries = table.len(), "Metadata loaded");

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_partial_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(
            &path,
            r#"{"Nova": {"tags": ["warm"]}, "Orion": {"alias": "Hunter", "description": "Deep"}}"#,
        )
        .unwrap();

        let table = JsonMetadataSource::new(&path).load().await.unwrap();
        assert_eq!(table.len(), 2);
        assert!(table["Nova"].alias.is_none());
        assert_eq!(table["Nova"].tags.as_deref(), Some(&["warm".to_string()][..]));
        assert_eq!(table["Orion"].alias.as_deref(), Some("Hunter"));
    }

    #[tokio::test]
    async fn test_malformed_source_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(&path, r#"{"Nova": {"tags": "not-a-list"}}"#).unwrap();

        let result = JsonMetadataSource::new(&path).load().await;
        assert!(matches!(result, Err(MetadataError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let result = JsonMetadataSource::new(dir.path().join("nope.json")).load().await;
        assert!(matches!(result, Err(MetadataError::IoError(_))));
    }
}
