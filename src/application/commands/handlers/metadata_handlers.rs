//! Metadata Command Handlers

use std::sync::Arc;

use crate::application::commands::MergeMetadata;
use crate::application::error::ApplicationError;
use crate::application::ports::{CatalogRepositoryPort, MetadataSourcePort};
use crate::domain::{merge_metadata, MergeReport};

/// MergeMetadata Handler
///
/// 外部元数据读取或解析失败时直接返回错误，目录不会被写入
pub struct MergeMetadataHandler {
    catalog_repo: Arc<dyn CatalogRepositoryPort>,
    metadata_source: Arc<dyn MetadataSourcePort>,
}

impl MergeMetadataHandler {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepositoryPort>,
        metadata_source: Arc<dyn MetadataSourcePort>,
    ) -> Self {
        Self {
            catalog_repo,
            metadata_source,
        }
    }

    pub async fn handle(&self, _command: MergeMetadata) -> Result<MergeReport, ApplicationError> {
        let table = self.metadata_source.load().await.map_err(|e| {
            tracing::error!(error = %e, "Metadata source rejected, catalog left untouched");
            ApplicationError::from(e)
        })?;

        let mut catalog = self.catalog_repo.load().await?;
        let report = merge_metadata(&mut catalog, &table);
        self.catalog_repo.save(&catalog).await?;

        tracing::info!(
            entries = table.len(),
            matched = report.matched,
            unmatched = report.unmatched,
            "Metadata merged into catalog"
        );

        Ok(report)
    }
}
