//! Audio Store Port - 磁盘缓存层
//!
//! 按 content key 读写音频字节，同时负责读取预置的 API 凭证

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::synthesis::Credential;
use crate::domain::ContentKey;

/// 持久化错误
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Corrupt cache file {path}: {message}")]
    Corrupt { path: String, message: String },
}

impl PersistenceError {
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn corrupt(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

/// Audio Store Port
///
/// 文件身份 = content key + 固定后缀，同一请求总是落到同一个文件。
/// 同 key 并发写入不做原子保证（内容幂等，后写者胜）。
#[async_trait]
pub trait AudioStorePort: Send + Sync {
    /// content key 对应的缓存文件路径
    fn path_for(&self, key: &ContentKey) -> PathBuf;

    /// 读取音频，不存在时返回 `Ok(None)`
    async fn load(&self, key: &ContentKey) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// 写入音频，返回文件路径
    async fn save(&self, key: &ContentKey, audio: &[u8]) -> Result<PathBuf, PersistenceError>;

    /// 读取 API 凭证，文件不存在或内容为空时返回 `Ok(None)`
    async fn load_credential(&self) -> Result<Option<Credential>, PersistenceError>;
}
