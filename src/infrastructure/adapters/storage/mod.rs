//! Storage Adapter - 内容存储实现

mod file_storage;
mod http_storage;

pub use file_storage::FileContentStorage;
pub use http_storage::{HttpContentStorage, HttpContentStorageConfig};
