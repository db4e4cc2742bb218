//! Audio Player Port - 预览播放抽象
//!
//! 运行在单线程、事件驱动的 UI 上下文中，因此这里的 trait 不要求 `Send`/`Sync`。
//! 播放结束或出错由宿主事件循环以 [`PlaybackEvent`] 的形式回送给协调器。

use std::fmt;

use thiserror::Error;

/// 播放错误（只记录日志，不会传给调用方）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Failed to open audio source: {0}")]
    OpenFailed(String),

    #[error("Failed to start playback: {0}")]
    StartFailed(String),

    #[error("Playback interrupted: {0}")]
    Interrupted(String),
}

/// 播放会话标识，每次 play 递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 播放事件类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEventKind {
    /// 自然播放结束
    Ended,
    /// 播放过程中出错
    Failed(PlaybackError),
}

/// 音频句柄回送的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackEvent {
    pub session: SessionToken,
    pub kind: PlaybackEventKind,
}

impl PlaybackEvent {
    pub fn ended(session: SessionToken) -> Self {
        Self {
            session,
            kind: PlaybackEventKind::Ended,
        }
    }

    pub fn failed(session: SessionToken, error: PlaybackError) -> Self {
        Self {
            session,
            kind: PlaybackEventKind::Failed(error),
        }
    }
}

/// 单个音频播放句柄
pub trait AudioHandle {
    /// 开始播放（不阻塞）
    fn start(&mut self) -> Result<(), PlaybackError>;

    /// 暂停
    fn pause(&mut self);

    /// 回到起始位置
    fn rewind(&mut self);
}

/// Audio Player Port
pub trait AudioPlayerPort {
    /// 为 `url` 创建播放句柄，事件需带上 `session`
    fn open(&self, url: &str, session: SessionToken) -> Result<Box<dyn AudioHandle>, PlaybackError>;
}

/// 触发播放的 UI 控件，暴露“是否正在播放”标记
pub trait PlaybackControl {
    fn is_playing(&self) -> bool;

    fn set_playing(&self, playing: bool);
}
