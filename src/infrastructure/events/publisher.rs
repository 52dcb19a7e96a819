//! Event Publisher Implementation
//!
//! 播放事件广播，供 UI 同步字幕等。没有订阅者时事件直接丢弃。

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::AudioSource;
use crate::domain::ContentKey;

/// 播放事件类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum PlaybackEvent {
    /// 开始解析一行对白
    Resolving {
        request_id: Uuid,
        #[serde(skip_serializing_if = "Option::is_none")]
        speaker: Option<String>,
    },
    /// 开始播放
    Playing {
        request_id: Uuid,
        content_key: ContentKey,
        source: AudioSource,
        duration_ms: u64,
    },
    /// 自然播放结束
    Finished { request_id: Uuid },
    /// 被新的 Speak 或显式 interrupt 打断
    Interrupted { request_id: Uuid },
    /// 所有层都失败
    Failed { request_id: Uuid, error: String },
}

impl PlaybackEvent {
    pub fn request_id(&self) -> Uuid {
        match self {
            Self::Resolving { request_id, .. }
            | Self::Playing { request_id, .. }
            | Self::Finished { request_id }
            | Self::Interrupted { request_id }
            | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<PlaybackEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.channel.subscribe()
    }

    pub fn publish_resolving(&self, request_id: Uuid, speaker: Option<&str>) {
        self.publish(PlaybackEvent::Resolving {
            request_id,
            speaker: speaker.map(str::to_string),
        });
    }

    pub fn publish_playing(
        &self,
        request_id: Uuid,
        content_key: &ContentKey,
        source: AudioSource,
        duration_ms: u64,
    ) {
        self.publish(PlaybackEvent::Playing {
            request_id,
            content_key: content_key.clone(),
            source,
            duration_ms,
        });
    }

    pub fn publish_finished(&self, request_id: Uuid) {
        self.publish(PlaybackEvent::Finished { request_id });
    }

    pub fn publish_interrupted(&self, request_id: Uuid) {
        self.publish(PlaybackEvent::Interrupted { request_id });
    }

    pub fn publish_failed(&self, request_id: Uuid, error: &str) {
        self.publish(PlaybackEvent::Failed {
            request_id,
            error: error.to_string(),
        });
    }

    fn publish(&self, event: PlaybackEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::trace!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
