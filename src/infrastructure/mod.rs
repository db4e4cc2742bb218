//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod memory;
pub mod persistence;

pub use adapters::{
    FileContentStorage, HttpContentStorage, HttpContentStorageConfig, HttpTtsClient,
    HttpTtsClientConfig,
};
pub use memory::{InMemoryCatalogRepository, InMemoryContentStorage};
pub use persistence::{JsonCatalogRepository, JsonMetadataSource};
