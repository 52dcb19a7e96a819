//! Audio Output Port - 播放设备抽象

use std::sync::Arc;
use thiserror::Error;

use crate::domain::{AudioClip, ContentKey};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Output device error: {0}")]
    Device(String),
}

/// Audio Output Port
///
/// `play` 只负责开始播放，不阻塞到播放结束
pub trait AudioOutputPort: Send + Sync {
    fn play(&self, key: &ContentKey, clip: Arc<AudioClip>) -> Result<(), PlaybackError>;

    /// 立即停止当前输出（无输出时为空操作）
    fn stop(&self);
}
