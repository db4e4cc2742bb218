//! Playback - 客户端预览播放协调

mod coordinator;

use std::cell::Cell;

use crate::application::ports::PlaybackControl;

pub use coordinator::{PlaybackCoordinator, PlaybackState};

/// 最简单的控件实现：一个带标签的播放标记
#[derive(Debug, Default)]
pub struct ControlFlag {
    label: String,
    playing: Cell<bool>,
}

impl ControlFlag {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            playing: Cell::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PlaybackControl for ControlFlag {
    fn is_playing(&self) -> bool {
        self.playing.get()
    }

    fn set_playing(&self, playing: bool) {
        self.playing.set(playing);
    }
}
