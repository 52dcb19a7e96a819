//! Silent Audio Output - 无声输出设备
//!
//! 供无音频设备的宿主（服务器、CI）使用：只记录日志与播放历史

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ports::{AudioOutputPort, PlaybackError};
use crate::domain::{AudioClip, ContentKey};

#[derive(Default)]
pub struct SilentAudioOutput {
    /// 按顺序记录播放过的 key
    history: Mutex<Vec<ContentKey>>,
    /// 当前「正在播放」的 key
    current: Mutex<Option<ContentKey>>,
    stops: AtomicUsize,
}

impl SilentAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn history(&self) -> Vec<ContentKey> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn current(&self) -> Option<ContentKey> {
        self.current.lock().ok().and_then(|c| c.clone())
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl AudioOutputPort for SilentAudioOutput {
    fn play(&self, key: &ContentKey, clip: Arc<AudioClip>) -> Result<(), PlaybackError> {
        tracing::info!(
            content_key = %key,
            duration_ms = clip.info().duration_ms,
            "Playing audio (silent output)"
        );
        self.history
            .lock()
            .map_err(|e| PlaybackError::Device(e.to_string()))?
            .push(key.clone());
        *self
            .current
            .lock()
            .map_err(|e| PlaybackError::Device(e.to_string()))? = Some(key.clone());
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut current) = self.current.lock() {
            if let Some(key) = current.take() {
                tracing::debug!(content_key = %key, "Stopped audio (silent output)");
            }
        }
    }
}
