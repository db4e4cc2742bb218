//! Persistence Layer - 数据持久化
//!
//! 音色目录与外部元数据都是 JSON 文件

pub mod json;

pub use self::json::{JsonCatalogRepository, JsonMetadataSource};
