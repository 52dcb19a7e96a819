//! Tiered Audio Cache - 内存 → 磁盘 两级缓存
//!
//! 内存层只是加速器，磁盘层是持久的事实来源。
//! 无淘汰策略：内存层在进程生命周期内无界增长，磁盘层永不自动清理。

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::AudioStorePort;
use crate::application::AudioSource;
use crate::domain::{AudioClip, AudioDecodeError, ContentKey};

/// 缓存查找结果
///
/// Miss 不是错误，表示「继续走网络」
#[derive(Debug, Clone)]
pub enum CacheLookup {
    Hit {
        clip: Arc<AudioClip>,
        source: AudioSource,
    },
    Miss,
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub memory_hits: u64,
    pub disk_hits: u64,
    pub misses: u64,
    pub memory_entries: usize,
    pub memory_bytes: u64,
}

/// 两级音频缓存
pub struct TieredAudioCache {
    /// content key -> 已解码音频
    memory: DashMap<ContentKey, Arc<AudioClip>>,
    disk: Arc<dyn AudioStorePort>,
    memory_hits: AtomicU64,
    disk_hits: AtomicU64,
    misses: AtomicU64,
}

impl TieredAudioCache {
    pub fn new(disk: Arc<dyn AudioStorePort>) -> Self {
        Self {
            memory: DashMap::new(),
            disk,
            memory_hits: AtomicU64::new(0),
            disk_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 依次查找内存层、磁盘层
    ///
    /// 磁盘命中时解码并写入内存层，之后同 key 的查找由内存层直接返回。
    /// 磁盘读取或解码失败按未命中处理，只记录 debug 日志；
    /// 整行失败时由协调器统一输出一条警告。
    pub async fn lookup(&self, key: &ContentKey) -> CacheLookup {
        if let Some(clip) = self.memory.get(key).map(|entry| entry.value().clone()) {
            self.memory_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(content_key = %key, tier = "memory", "Cache hit");
            return CacheLookup::Hit {
                clip,
                source: AudioSource::Memory,
            };
        }

        match self.disk.load(key).await {
            Ok(Some(bytes)) => match AudioClip::decode(bytes) {
                Ok(clip) => {
                    let clip = Arc::new(clip);
                    self.memory.insert(key.clone(), clip.clone());
                    self.disk_hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(content_key = %key, tier = "disk", "Cache hit");
                    return CacheLookup::Hit {
                        clip,
                        source: AudioSource::Disk,
                    };
                }
                Err(e) => {
                    tracing::debug!(
                        content_key = %key,
                        tier = "disk",
                        path = %self.disk.path_for(key).display(),
                        error = %e,
                        "Cached audio is not playable, ignoring it"
                    );
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(content_key = %key, tier = "disk", error = %e, "Disk cache read failed");
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(content_key = %key, "Cache miss");
        CacheLookup::Miss
    }

    /// 存入新合成的音频：解码 → 写盘 → 写内存
    ///
    /// 写盘失败只记录日志，音频仍进入内存层供本进程使用
    pub async fn store(
        &self,
        key: &ContentKey,
        bytes: Vec<u8>,
    ) -> Result<Arc<AudioClip>, AudioDecodeError> {
        let clip = Arc::new(AudioClip::decode(bytes)?);

        if let Err(e) = self.disk.save(key, clip.bytes()).await {
            tracing::warn!(
                content_key = %key,
                tier = "disk",
                error = %e,
                "Failed to persist synthesized audio"
            );
        }

        self.memory.insert(key.clone(), clip.clone());
        Ok(clip)
    }

    pub fn contains_in_memory(&self, key: &ContentKey) -> bool {
        self.memory.contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        let memory_bytes = self
            .memory
            .iter()
            .map(|entry| entry.value().len() as u64)
            .sum();

        CacheStats {
            memory_hits: self.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.disk_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            memory_entries: self.memory.len(),
            memory_bytes,
        }
    }
}
