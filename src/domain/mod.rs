//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Voice Context: 音色目录
//! - Sample Context: 多语言预览样本规则
//! - Metadata Context: 外部元数据合并

pub mod metadata;
pub mod sample;
pub mod voice;

pub use metadata::{merge_metadata, MergeReport, MetadataRecord, MetadataTable};
pub use sample::{sample_storage_key, SampleTexts, SAMPLE_CONTENT_TYPE};
