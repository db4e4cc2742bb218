//! JSON 文件持久化

mod catalog_repo;
mod metadata_source;

pub use catalog_repo::JsonCatalogRepository;
pub use metadata_source::JsonMetadataSource;
