//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::voice::VoiceSettings;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 内容存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 目录文件配置
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 样本生成配置
    #[serde(default)]
    pub samples: SamplesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// 多语言模型标识
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 重试退避基数（毫秒）
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,

    /// 音色参数
    #[serde(default)]
    pub voice_settings: VoiceSettings,
}

fn default_tts_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_retry_backoff() -> u64 {
    2000
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            api_key: String::new(),
            model_id: default_model_id(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff(),
            voice_settings: VoiceSettings::default(),
        }
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 本地目录 + 静态访问前缀
    #[default]
    File,
    /// HTTP 对象存储服务
    Http,
}

/// 内容存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 后端类型
    #[serde(default)]
    pub backend: StorageBackend,

    /// file 后端: 存储根目录
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// file 后端: 对外访问前缀
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// http 后端: 上传端点
    #[serde(default)]
    pub endpoint: String,

    /// http 后端: 访问令牌
    #[serde(default)]
    pub token: String,

    /// http 后端: 请求超时时间（秒）
    #[serde(default = "default_storage_timeout")]
    pub timeout_secs: u64,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_storage_timeout() -> u64 {
    60
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            root_dir: default_root_dir(),
            public_base_url: default_public_base_url(),
            endpoint: String::new(),
            token: String::new(),
            timeout_secs: default_storage_timeout(),
        }
    }
}

/// 目录文件配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// 音色目录 JSON 路径
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// 外部元数据 JSON 路径
    #[serde(default = "default_metadata_path")]
    pub metadata_path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/voices.json")
}

fn default_metadata_path() -> PathBuf {
    PathBuf::from("data/voice-metadata.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            metadata_path: default_metadata_path(),
        }
    }
}

/// 样本生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SamplesConfig {
    /// 基础语言（该语言及其地区变体不生成本地化样本）
    #[serde(default = "default_base_language")]
    pub base_language: String,

    /// 每个成功条目后的等待时间（毫秒）
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// 语言 -> 示例句子；配置文件中的条目覆盖内置条目
    #[serde(default)]
    pub texts: HashMap<String, String>,
}

fn default_base_language() -> String {
    "en".to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            base_language: default_base_language(),
            delay_ms: default_delay_ms(),
            texts: HashMap::new(),
        }
    }
}

impl SamplesConfig {
    /// 内置示例句子与配置合并后的结果
    pub fn merged_texts(&self) -> HashMap<String, String> {
        let mut texts: HashMap<String, String> = builtin_sample_texts()
            .iter()
            .map(|(lang, text)| (lang.to_string(), text.to_string()))
            .collect();
        for (lang, text) in &self.texts {
            texts.insert(lang.clone(), text.clone());
        }
        texts
    }
}

/// 内置示例句子
pub fn builtin_sample_texts() -> &'static [(&'static str, &'static str)] {
    &[
        ("es", "Hola, soy tu narrador. Acompáñame en esta historia."),
        ("fr", "Bonjour, je suis votre narrateur. Laissez-moi vous raconter une histoire."),
        ("de", "Hallo, ich bin Ihr Erzähler. Lassen Sie mich Ihnen eine Geschichte erzählen."),
        ("it", "Ciao, sono il tuo narratore. Lascia che ti racconti una storia."),
        ("pt", "Olá, eu sou o seu narrador. Deixe-me contar uma história."),
        ("pl", "Cześć, jestem twoim narratorem. Pozwól, że opowiem ci historię."),
        ("hi", "नमस्ते, मैं आपका कथावाचक हूँ। आइए, मैं आपको एक कहानी सुनाता हूँ।"),
        ("ja", "こんにちは、私はあなたの語り手です。物語をお聞かせしましょう。"),
        ("ko", "안녕하세요, 저는 여러분의 내레이터입니다. 이야기를 들려드릴게요."),
        ("zh", "你好，我是你的讲述者。让我为你讲一个故事。"),
        ("nl", "Hallo, ik ben je verteller. Laat me je een verhaal vertellen."),
        ("tr", "Merhaba, ben anlatıcınızım. Size bir hikâye anlatayım."),
        ("sv", "Hej, jag är din berättare. Låt mig berätta en historia."),
        ("id", "Halo, saya narator Anda. Izinkan saya menceritakan sebuah kisah."),
        ("ru", "Здравствуйте, я ваш рассказчик. Позвольте рассказать вам историю."),
        ("ar", "مرحبًا، أنا راويك. دعني أحكي لك قصة."),
        ("cs", "Dobrý den, jsem váš vypravěč. Dovolte mi vyprávět vám příběh."),
        ("da", "Hej, jeg er din fortæller. Lad mig fortælle dig en historie."),
        ("fi", "Hei, olen kertojasi. Anna minun kertoa sinulle tarina."),
        ("el", "Γεια σας, είμαι ο αφηγητής σας. Αφήστε με να σας πω μια ιστορία."),
        ("ro", "Bună, sunt naratorul tău. Lasă-mă să-ți spun o poveste."),
        ("uk", "Привіт, я ваш оповідач. Дозвольте розповісти вам історію."),
        ("hu", "Helló, én vagyok a mesélőd. Hadd meséljek neked egy történetet."),
    ]
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tts.model_id, "eleven_multilingual_v2");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.catalog.path, PathBuf::from("data/voices.json"));
        assert_eq!(config.samples.delay_ms, 1000);
        assert_eq!(config.samples.base_language, "en");
    }

    #[test]
    fn test_configured_texts_override_builtin() {
        let mut samples = SamplesConfig::default();
        samples.texts.insert("es".to_string(), "Buenas.".to_string());
        samples.texts.insert("eu".to_string(), "Kaixo.".to_string());

        let texts = samples.merged_texts();
        assert_eq!(texts["es"], "Buenas.");
        assert_eq!(texts["eu"], "Kaixo.");
        assert!(texts.contains_key("ja"));
        assert!(!texts.contains_key("en"));
    }
}
