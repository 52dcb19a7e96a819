//! Speak 结果与播放状态

use serde::{Deserialize, Serialize};

use super::error::ResolveError;
use crate::domain::ContentKey;

/// 音频来自哪一层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    Memory,
    Disk,
    Network,
}

impl std::fmt::Display for AudioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioSource::Memory => write!(f, "memory"),
            AudioSource::Disk => write!(f, "disk"),
            AudioSource::Network => write!(f, "network"),
        }
    }
}

/// 协调器状态
///
/// Idle → Resolving → Playing；Resolving 可被新请求抢占，全部失败时回到 Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Resolving,
    Playing,
}

/// 单次 Speak 的最终结果
#[derive(Debug)]
pub enum SpeakOutcome {
    /// 音频已开始播放
    Played { key: ContentKey, source: AudioSource },
    /// 空文本，未做任何事
    Skipped,
    /// 被更新的 Speak 抢占，结果已丢弃
    Superseded,
    /// 所有层都失败，没有声音
    Failed(ResolveError),
}

impl SpeakOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, Self::Played { .. })
    }

    pub fn source(&self) -> Option<AudioSource> {
        match self {
            Self::Played { source, .. } => Some(*source),
            _ => None,
        }
    }
}
