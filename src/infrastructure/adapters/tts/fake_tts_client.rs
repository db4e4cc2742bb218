//! Fake TTS Client - 不调用真实服务的 TTS 客户端
//!
//! 返回固定音频，可按音色注入失败，并记录调用与并发情况

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{SpeechRequest, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 模拟推理延迟
    pub latency: Duration,
    /// 这些 provider voice id 返回服务错误
    pub failing_voices: Vec<String>,
    /// health_check 的返回值
    pub healthy: bool,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"ID3\x04\x00fake-mp3".to_vec(),
            latency: Duration::from_millis(5),
            failing_voices: Vec::new(),
            healthy: true,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    health_checks: AtomicUsize,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            health_checks: AtomicUsize::new(0),
        }
    }

    /// 已收到请求的 provider voice id（按调用顺序）
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// 观察到的最大并发请求数
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn health_checks(&self) -> usize {
        self.health_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn generate_speech(&self, request: SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.provider_voice_id.clone());
        }

        tracing::debug!(
            voice_id = %request.provider_voice_id,
            text_len = request.text.len(),
            "FakeTtsClient: returning fixed audio"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.config.failing_voices.contains(&request.provider_voice_id) {
            return Err(TtsError::ServiceError {
                status: 500,
                message: "injected failure".to_string(),
            });
        }

        Ok(self.config.audio_data.clone())
    }

    async fn health_check(&self) -> bool {
        self.health_checks.fetch_add(1, Ordering::SeqCst);
        self.config.healthy
    }
}
