//! File Storage - 文件系统内容存储实现
//!
//! 实现 ContentStoragePort trait，文件写在 `root_dir/<key>`，
//! 对外地址为 `public_base_url/<key>`（由静态文件服务或 CDN 提供）

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{validate_key, ContentStoragePort, StorageError, StoredObject};

/// 文件系统内容存储
pub struct FileContentStorage {
    /// 存储根目录
    root_dir: PathBuf,
    /// 对外访问前缀
    public_base_url: String,
}

impl FileContentStorage {
    /// 创建新的文件存储
    pub async fn new(
        root_dir: impl AsRef<Path>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let root_dir = root_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&root_dir)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        Ok(Self {
            root_dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// key 对应的本地路径
    pub fn object_path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl ContentStoragePort for FileContentStorage {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        validate_key(key)?;

        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::IoError(e.to_string()))?;
        }

        let size = data.len();
        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(
            key = %key,
            content_type = %content_type,
            size = size,
            "Stored object on disk"
        );

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
        })
    }
}
