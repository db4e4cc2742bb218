//! Voicebank - 合成音色目录与多语言预览样本
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录
//! - Sample Context: 样本文本与存储 key 规则
//! - Metadata Context: 外部元数据合并
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, ContentStorage, CatalogRepository, MetadataSource, AudioPlayer）
//! - Commands: GenerateSamples, MergeMetadata 及其处理器
//! - Playback: 单飞预览播放协调器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP TTS Client, 文件/HTTP 内容存储
//! - Persistence: JSON 目录与元数据文件
//! - Memory: 内存实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
