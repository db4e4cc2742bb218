//! In-Memory Content Storage Implementation

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{validate_key, ContentStoragePort, StorageError, StoredObject};

/// 存储中的对象
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// 内存内容存储
pub struct InMemoryContentStorage {
    base_url: String,
    /// key -> blob
    objects: DashMap<String, StoredBlob>,
    /// 这些 key 的写入会失败
    failing_keys: DashSet<String>,
    put_count: AtomicUsize,
}

impl InMemoryContentStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: DashMap::new(),
            failing_keys: DashSet::new(),
            put_count: AtomicUsize::new(0),
        }
    }

    /// 让指定 key 的写入失败
    pub fn fail_key(&self, key: impl Into<String>) {
        self.failing_keys.insert(key.into());
    }

    /// 已存储的 key（排序后）
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.get(key).map(|e| e.value().clone())
    }

    /// 成功写入的次数（含覆盖）
    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStoragePort for InMemoryContentStorage {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        validate_key(key)?;

        if self.failing_keys.contains(key) {
            return Err(StorageError::ServiceError {
                status: 503,
                message: "injected failure".to_string(),
            });
        }

        self.objects.insert(
            key.to_string(),
            StoredBlob {
                data,
                content_type: content_type.to_string(),
            },
        );
        self.put_count.fetch_add(1, Ordering::SeqCst);

        Ok(StoredObject {
            key: key.to_string(),
            url: format!("{}/{}", self.base_url, key),
        })
    }
}
