//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、ContentStorage、CatalogRepository 等）
//! - commands: 样本生成、元数据合并命令及处理器
//! - playback: 客户端单飞预览播放协调器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod playback;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{
        GenerateSamplesHandler, ItemOutcome, ItemReport, MergeMetadataHandler,
        SamplePipelineConfig, SampleReport,
    },
    GenerateSamples, MergeMetadata,
};

pub use error::ApplicationError;

pub use playback::{ControlFlag, PlaybackCoordinator, PlaybackState};

pub use ports::{
    // Audio player
    AudioHandle,
    AudioPlayerPort,
    PlaybackControl,
    PlaybackError,
    PlaybackEvent,
    PlaybackEventKind,
    SessionToken,
    // Repositories
    CatalogRepositoryPort,
    MetadataError,
    MetadataSourcePort,
    RepositoryError,
    // Content storage
    ContentStoragePort,
    StorageError,
    StoredObject,
    // TTS engine
    SpeechRequest,
    TtsEnginePort,
    TtsError,
};
