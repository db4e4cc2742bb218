//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色目录（唯一性约束）
//! - 语言标签与基础语言判定
//! - TTS 音色参数

mod aggregate;
mod catalog;
mod errors;
mod value_objects;

pub use aggregate::Voice;
pub use catalog::VoiceCatalog;
pub use errors::VoiceError;
pub use value_objects::{LanguageCode, VoiceId, VoiceSettings};
