//! 应用层错误定义
//!
//! 只有整次运行失败的情况才会成为 ApplicationError；
//! 样本生成中单个音色的失败以 `ItemOutcome` 返回，不会出现在这里

use thiserror::Error;

use crate::application::ports::{MetadataError, RepositoryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 仓储错误（目录读取或写回失败）
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部元数据不可用或格式错误，合并中止且不写入
    #[error("Metadata source error: {0}")]
    MetadataError(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<MetadataError> for ApplicationError {
    fn from(err: MetadataError) -> Self {
        Self::MetadataError(err.to_string())
    }
}
