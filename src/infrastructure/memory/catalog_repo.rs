//! In-Memory Catalog Repository Implementation

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{CatalogRepositoryPort, RepositoryError};
use crate::domain::voice::VoiceCatalog;

/// 内存目录仓储
///
/// 记录写回次数，可注入写失败
pub struct InMemoryCatalogRepository {
    catalog: Mutex<VoiceCatalog>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryCatalogRepository {
    pub fn new(catalog: VoiceCatalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            save_count: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// 当前保存的目录
    pub fn snapshot(&self) -> VoiceCatalog {
        self.catalog
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 成功写回的次数
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// 让后续写回失败
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new(VoiceCatalog::default())
    }
}

#[async_trait]
impl CatalogRepositoryPort for InMemoryCatalogRepository {
    async fn load(&self) -> Result<VoiceCatalog, RepositoryError> {
        self.catalog
            .lock()
            .map(|c| c.clone())
            .map_err(|e| RepositoryError::IoError(e.to_string()))
    }

    async fn save(&self, catalog: &VoiceCatalog) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::IoError("injected write failure".to_string()));
        }

        let mut current = self
            .catalog
            .lock()
            .map_err(|e| RepositoryError::IoError(e.to_string()))?;
        *current = catalog.clone();
        self.save_count.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(voices = catalog.len(), "Catalog replaced in memory");
        Ok(())
    }
}
