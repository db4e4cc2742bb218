//! Voice Context - Errors

use thiserror::Error;

use super::VoiceId;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("音色 ID 重复: {0}")]
    DuplicateId(VoiceId),

    #[error("角色名重复: {0}")]
    DuplicateCharacter(String),

    #[error("无效的音色记录: {0}")]
    InvalidRecord(String),
}
