//! Cache Layer - 分层音频缓存

mod tiered_cache;

pub use tiered_cache::{CacheLookup, CacheStats, TieredAudioCache};
