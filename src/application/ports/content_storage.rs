//! Content Storage Port - 出站端口
//!
//! 持久化生成的预览音频，返回可公开访问的 URL

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误
///
/// 在样本生成流程中归类为单条目的 `UploadFailure`
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Storage service error: HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 已存储对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// 存储 key
    pub key: String,
    /// 公开访问地址
    pub url: String,
}

/// Content Storage Port
///
/// 同一个 key 重复写入会覆盖原内容
#[async_trait]
pub trait ContentStoragePort: Send + Sync {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;
}

/// 校验存储 key：非空、相对路径、不含 `..`
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
