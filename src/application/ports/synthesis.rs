//! Synthesis Port - 外部 TTS 合成服务抽象
//!
//! 具体实现在 infrastructure/adapters/tts

use async_trait::async_trait;
use thiserror::Error;

/// 合成错误
///
/// 所有变体对进程都不是致命的，只意味着这一行没有声音
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("No API credential configured")]
    ConfigurationMissing,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl SynthesisError {
    /// 仅传输层错误值得重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

/// API 凭证
///
/// 进程级，启动时加载一次。Debug 输出不包含明文。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 去除首尾空白，空串视为没有凭证
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Synthesis Port
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// 发送规范化载荷，返回解码后的原始音频字节
    async fn synthesize(
        &self,
        payload: &[u8],
        credential: Option<&Credential>,
    ) -> Result<Vec<u8>, SynthesisError>;
}
