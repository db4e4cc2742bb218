//! Memory Layer - In-Memory Adapters
//!
//! 目录仓储和内容存储的内存实现，用于测试和本地演练

mod catalog_repo;
mod content_storage;

pub use catalog_repo::InMemoryCatalogRepository;
pub use content_storage::{InMemoryContentStorage, StoredBlob};
