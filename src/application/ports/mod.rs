//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_player;
mod content_storage;
mod repositories;
mod tts_engine;

pub use audio_player::{
    AudioHandle, AudioPlayerPort, PlaybackControl, PlaybackError, PlaybackEvent,
    PlaybackEventKind, SessionToken,
};
pub use content_storage::{validate_key, ContentStoragePort, StorageError, StoredObject};
pub use repositories::{
    CatalogRepositoryPort, MetadataError, MetadataSourcePort, RepositoryError,
};
pub use tts_engine::{SpeechRequest, TtsEnginePort, TtsError};
