//! Storage Adapter - 磁盘缓存层实现

mod disk_store;

pub use disk_store::{DiskStoreConfig, FileAudioStore};
