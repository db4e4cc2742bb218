//! JSON Catalog Repository
//!
//! 目录是一个 JSON 数组，整份读写。写入先落到同目录下的临时文件，
//! fsync 后 rename 覆盖目标文件，读者只会看到旧版本或新版本

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::ports::{CatalogRepositoryPort, RepositoryError};
use crate::domain::voice::{Voice, VoiceCatalog};

/// JSON 文件目录仓储
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "catalog.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }

    async fn write_temp(&self, temp: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepositoryPort for JsonCatalogRepository {
    async fn load(&self) -> Result<VoiceCatalog, RepositoryError> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|e| RepositoryError::IoError(format!("{}: {}", self.path.display(), e)))?;

        let voices: Vec<Voice> = serde_json::from_slice(&raw)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let catalog = VoiceCatalog::new(voices)
            .map_err(|e| RepositoryError::InvalidCatalog(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), voices = catalog.len(), "Catalog loaded");

        Ok(catalog)
    }

    async fn save(&self, catalog: &VoiceCatalog) -> Result<(), RepositoryError> {
        let mut data = serde_json::to_vec_pretty(catalog.voices())
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        data.push(b'\n');

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, &data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(RepositoryError::IoError(e.to_string()));
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(RepositoryError::IoError(e.to_string()));
        }

        tracing::info!(
            path = %self.path.display(),
            voices = catalog.len(),
            bytes = data.len(),
            "Catalog written"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{LanguageCode, VoiceId};
    use tempfile::tempdir;

    const CATALOG: &str = r#"[
  {
    "id": "1",
    "character": "Nova",
    "providerVoiceId": "pv-1",
    "language": "es",
    "previewUrl": null,
    "gender": "female"
  },
  {
    "id": "2",
    "character": "Orion",
    "providerVoiceId": "pv-2",
    "language": "en",
    "previewUrl": "https://cdn/orion.mp3",
    "tags": ["deep"]
  }
]"#;

    #[tokio::test]
    async fn test_load_and_save_round_trip_preserves_order_and_extras() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");
        std::fs::write(&path, CATALOG).unwrap();
        let repo = JsonCatalogRepository::new(&path);

        let mut catalog = repo.load().await.unwrap();
        catalog
            .get_mut(&VoiceId::new("1").unwrap())
            .unwrap()
            .set_preview_url("https://cdn/x.mp3");
        repo.save(&catalog).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["id"], "1");
        assert_eq!(raw[0]["previewUrl"], "https://cdn/x.mp3");
        assert_eq!(raw[0]["gender"], "female");
        assert_eq!(raw[1]["tags"][0], "deep");

        // 只剩目标文件，临时文件已被 rename
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_character_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");
        let voices = vec![
            Voice::new(VoiceId::new("1").unwrap(), "Nova", "a", LanguageCode::new("es").unwrap()),
            Voice::new(VoiceId::new("2").unwrap(), "Nova", "b", LanguageCode::new("fr").unwrap()),
        ];
        std::fs::write(&path, serde_json::to_string(&voices).unwrap()).unwrap();

        let result = JsonCatalogRepository::new(&path).load().await;
        assert!(matches!(result, Err(RepositoryError::InvalidCatalog(_))));
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");
        std::fs::write(&path, "[{\"id\": ").unwrap();

        let result = JsonCatalogRepository::new(&path).load().await;
        assert!(matches!(result, Err(RepositoryError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_blank_id_or_language_is_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");
        let repo = JsonCatalogRepository::new(&path);

        std::fs::write(
            &path,
            r#"[{"id": "  ", "character": "Nova", "providerVoiceId": "pv-1", "language": "es"}]"#,
        )
        .unwrap();
        let result = repo.load().await;
        assert!(matches!(result, Err(RepositoryError::SerializationError(_))));

        std::fs::write(
            &path,
            r#"[{"id": "1", "character": "Nova", "providerVoiceId": "pv-1", "language": ""}]"#,
        )
        .unwrap();
        let result = repo.load().await;
        assert!(matches!(result, Err(RepositoryError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_failed_save_into_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("voices.json");
        let repo = JsonCatalogRepository::new(&path);

        let result = repo.save(&VoiceCatalog::default()).await;
        assert!(matches!(result, Err(RepositoryError::IoError(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_save_leaves_previous_file_intact() {
        let dir = tempdir().unwrap();
        // 目标文件名合法，但加上临时前后缀后超过 NAME_MAX，临时文件无法创建
        let path = dir.path().join(format!("{}.json", "v".repeat(230)));
        std::fs::write(&path, CATALOG).unwrap();
        let repo = JsonCatalogRepository::new(&path);

        let mut catalog = repo.load().await.unwrap();
        catalog
            .get_mut(&VoiceId::new("1").unwrap())
            .unwrap()
            .set_preview_url("https://cdn/new.mp3");

        let result = repo.save(&catalog).await;
        assert!(matches!(result, Err(RepositoryError::IoError(_))));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), CATALOG);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
