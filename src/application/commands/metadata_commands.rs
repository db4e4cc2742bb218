//! Metadata Commands

/// 将外部元数据表合并进音色目录
#[derive(Debug, Clone, Default)]
pub struct MergeMetadata;
