//! Repository Ports - 出站端口
//!
//! 目录与外部元数据的持久化抽象
//! 具体实现在 infrastructure 层（JSON 文件）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::VoiceCatalog;
use crate::domain::MetadataTable;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// 外部元数据错误（对合并流程是致命的）
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to read metadata source: {0}")]
    IoError(String),

    #[error("Malformed metadata source: {0}")]
    ParseError(String),
}

// ============================================================================
// Catalog Repository
// ============================================================================

/// 音色目录仓储 - 整份读写，没有按条目更新的接口
#[async_trait]
pub trait CatalogRepositoryPort: Send + Sync {
    /// 读取整个目录
    async fn load(&self) -> Result<VoiceCatalog, RepositoryError>;

    /// 原子替换整个目录
    async fn save(&self, catalog: &VoiceCatalog) -> Result<(), RepositoryError>;
}

// ============================================================================
// Metadata Source
// ============================================================================

/// 外部元数据来源
#[async_trait]
pub trait MetadataSourcePort: Send + Sync {
    async fn load(&self) -> Result<MetadataTable, MetadataError>;
}
