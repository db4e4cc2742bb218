//! HTTP Storage - 对象存储服务客户端
//!
//! PUT {endpoint}/{key}
//! Headers: Authorization: Bearer <token>, x-content-type, x-add-random-suffix: 0
//! Response: {"url": "https://...", "pathname": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{validate_key, ContentStoragePort, StorageError, StoredObject};

/// 存储服务响应
#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

/// HTTP 存储客户端配置
#[derive(Debug, Clone)]
pub struct HttpContentStorageConfig {
    /// 上传端点
    pub endpoint: String,
    /// 访问令牌
    pub token: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// HTTP 对象存储客户端
pub struct HttpContentStorage {
    client: Client,
    config: HttpContentStorageConfig,
}

impl HttpContentStorage {
    pub fn new(config: HttpContentStorageConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl ContentStoragePort for HttpContentStorage {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        validate_key(key)?;

        let size = data.len();
        let response = self
            .client
            .put(self.object_url(key))
            .bearer_auth(&self.config.token)
            .header("x-content-type", content_type)
            // 固定 key，重复上传覆盖同一对象
            .header("x-add-random-suffix", "0")
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::ServiceError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: PutResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        tracing::debug!(key = %key, size = size, url = %body.url, "Uploaded object");

        Ok(StoredObject {
            key: key.to_string(),
            url: body.url,
        })
    }
}
