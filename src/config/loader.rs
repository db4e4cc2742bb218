//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（voicebank.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, StorageBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["voicebank", "voicebank.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEBANK_`，层级分隔符 `__`）
/// 2. 配置文件（voicebank.toml 或 voicebank.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEBANK_TTS__API_KEY=sk-...`
/// - `VOICEBANK_STORAGE__BACKEND=http`
/// - `VOICEBANK_CATALOG__PATH=/data/voices.json`
/// - `VOICEBANK_SAMPLES__DELAY_MS=1500`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("tts.url", "https://api.elevenlabs.io")?
        .set_default("tts.model_id", "eleven_multilingual_v2")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("tts.max_retries", 0)?
        .set_default("tts.retry_backoff_ms", 2000)?
        .set_default("storage.backend", "file")?
        .set_default("storage.root_dir", "public")?
        .set_default("storage.public_base_url", "http://localhost:3000")?
        .set_default("storage.timeout_secs", 60)?
        .set_default("catalog.path", "data/voices.json")?
        .set_default("catalog.metadata_path", "data/voice-metadata.json")?
        .set_default("samples.base_language", "en")?
        .set_default("samples.delay_ms", 1000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: VOICEBANK_TTS__URL=http://tts-proxy:8000
    builder = builder.add_source(
        Environment::with_prefix("VOICEBANK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.model_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS model id cannot be empty".to_string(),
        ));
    }

    config
        .tts
        .voice_settings
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.storage.backend == StorageBackend::Http && config.storage.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage endpoint is required for the http backend".to_string(),
        ));
    }

    if config.catalog.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Catalog path cannot be empty".to_string(),
        ));
    }

    if config.samples.base_language.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Base language cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS API Key: {}", redact(&config.tts.api_key));
    tracing::info!("TTS Model: {}", config.tts.model_id);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("TTS Max Retries: {}", config.tts.max_retries);
    tracing::info!("Storage Backend: {:?}", config.storage.backend);
    match config.storage.backend {
        StorageBackend::File => {
            tracing::info!("Storage Root: {:?}", config.storage.root_dir);
            tracing::info!("Storage Public URL: {}", config.storage.public_base_url);
        }
        StorageBackend::Http => {
            tracing::info!("Storage Endpoint: {}", config.storage.endpoint);
            tracing::info!("Storage Token: {}", redact(&config.storage.token));
        }
    }
    tracing::info!("Catalog: {:?}", config.catalog.path);
    tracing::info!("Metadata Source: {:?}", config.catalog.metadata_path);
    tracing::info!("Base Language: {}", config.samples.base_language);
    tracing::info!("Inter-item Delay: {}ms", config.samples.delay_ms);
    tracing::info!("Sample Languages: {}", config.samples.merged_texts().len());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_tts_url() {
        let mut config = AppConfig::default();
        config.tts.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_http_backend_without_endpoint() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Http;
        assert!(validate_config(&config).is_err());

        config.storage.endpoint = "https://blob.example.com".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_out_of_range_settings() {
        let mut config = AppConfig::default();
        config.tts.voice_settings.similarity_boost = 2.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[tts]
api_key = "secret"
max_retries = 2

[tts.voice_settings]
stability = 0.3

[storage]
backend = "http"
endpoint = "https://blob.example.com"

[samples]
delay_ms = 250

[samples.texts]
eu = "Kaixo, ni zure narratzailea naiz."
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.tts.api_key, "secret");
        assert_eq!(config.tts.max_retries, 2);
        assert_eq!(config.tts.voice_settings.stability, 0.3);
        assert_eq!(config.tts.voice_settings.similarity_boost, 0.75);
        assert_eq!(config.storage.backend, StorageBackend::Http);
        assert_eq!(config.samples.delay_ms, 250);
        assert!(config.samples.merged_texts().contains_key("eu"));
        assert_eq!(config.catalog.path, std::path::PathBuf::from("data/voices.json"));
    }
}
