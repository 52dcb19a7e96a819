//! Disk Store - 文件系统音频缓存实现
//!
//! 实现 AudioStorePort trait。每个 content key 一个文件，
//! 文件内容为 base64 文本（与 audioContent 字段格式一致）。

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioStorePort, Credential, PersistenceError};
use crate::domain::ContentKey;

/// 磁盘缓存配置
#[derive(Debug, Clone)]
pub struct DiskStoreConfig {
    /// 缓存目录
    pub cache_dir: PathBuf,
    /// 缓存文件后缀
    pub file_suffix: String,
    /// 凭证文件名（位于缓存目录内）
    pub credential_file: String,
}

impl Default for DiskStoreConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("Assets/Resources/Cache"),
            file_suffix: ".cachedata".to_string(),
            credential_file: "apikey.txt".to_string(),
        }
    }
}

/// 文件系统音频缓存
pub struct FileAudioStore {
    config: DiskStoreConfig,
}

impl FileAudioStore {
    /// 创建磁盘缓存，目录不存在时创建
    pub async fn new(config: DiskStoreConfig) -> Result<Self, PersistenceError> {
        fs::create_dir_all(&config.cache_dir)
            .await
            .map_err(|e| PersistenceError::io(&config.cache_dir, e))?;

        tracing::info!(
            cache_dir = %config.cache_dir.display(),
            suffix = %config.file_suffix,
            "FileAudioStore initialized"
        );

        Ok(Self { config })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.config.cache_dir
    }

    pub fn credential_path(&self) -> PathBuf {
        self.config.cache_dir.join(&self.config.credential_file)
    }
}

#[async_trait]
impl AudioStorePort for FileAudioStore {
    fn path_for(&self, key: &ContentKey) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}{}", key, self.config.file_suffix))
    }

    async fn load(&self, key: &ContentKey) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.path_for(key);

        let encoded = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(&path, e)),
        };

        let audio = STANDARD
            .decode(encoded.trim())
            .map_err(|e| PersistenceError::corrupt(&path, e.to_string()))?;

        tracing::debug!(
            content_key = %key,
            size_bytes = audio.len(),
            "Loaded cached audio from disk"
        );

        Ok(Some(audio))
    }

    async fn save(&self, key: &ContentKey, audio: &[u8]) -> Result<PathBuf, PersistenceError> {
        // 目录可能在运行期间被删除
        fs::create_dir_all(&self.config.cache_dir)
            .await
            .map_err(|e| PersistenceError::io(&self.config.cache_dir, e))?;

        let path = self.path_for(key);
        fs::write(&path, STANDARD.encode(audio))
            .await
            .map_err(|e| PersistenceError::io(&path, e))?;

        tracing::debug!(
            content_key = %key,
            path = %path.display(),
            size_bytes = audio.len(),
            "Saved audio to disk cache"
        );

        Ok(path)
    }

    async fn load_credential(&self) -> Result<Option<Credential>, PersistenceError> {
        let path = self.credential_path();

        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Credential::new(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::io(&path, e)),
        }
    }
}
