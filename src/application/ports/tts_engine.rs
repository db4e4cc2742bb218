//! TTS Engine Port - 语音合成抽象
//!
//! 定义外部 TTS 服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::VoiceSettings;

/// TTS 错误
///
/// 在样本生成流程中全部归类为单条目的 `GenerationFailure`
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TtsError {
    /// 是否值得重试（限流、服务端错误、网络抖动）
    pub fn is_retryable(&self) -> bool {
        match self {
            TtsError::NetworkError(_) | TtsError::Timeout => true,
            TtsError::ServiceError { status, .. } => *status == 429 || *status >= 500,
            TtsError::InvalidResponse(_) => false,
        }
    }
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// TTS 服务识别的音色 ID
    pub provider_voice_id: String,
    /// 要合成的文本
    pub text: String,
    /// 模型标识（多语言模型）
    pub model_id: String,
    /// 音色参数
    pub settings: VoiceSettings,
}

/// TTS Engine Port
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成语音，返回原始音频字节（MP3）
    async fn generate_speech(&self, request: SpeechRequest) -> Result<Vec<u8>, TtsError>;

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
