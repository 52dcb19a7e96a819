//! 应用层错误定义
//!
//! 单行对白解析失败的统一错误类型。所有变体都在协调器边界被捕获、记录，
//! 并转换为「这一行不播放声音」。磁盘层的读写失败不会让一行失败：
//! 读失败按未命中处理，写失败只记录日志。

use thiserror::Error;

use crate::application::ports::{PlaybackError, SynthesisError};
use crate::domain::RequestError;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// 请求无法构建
    #[error("Invalid synthesis request: {0}")]
    Request(#[from] RequestError),

    /// 合成服务失败（含缺少凭证、响应格式错误）
    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// 播放设备失败
    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    /// 内部错误（后台任务异常退出）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolveError {
    /// 失败发生在哪一层，用于日志
    pub fn tier(&self) -> &'static str {
        match self {
            Self::Request(_) => "request",
            Self::Synthesis(_) => "network",
            Self::Playback(_) => "output",
            Self::Internal(_) => "coordinator",
        }
    }

    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::Synthesis(SynthesisError::ConfigurationMissing))
    }
}
