//! Voiceline - 对白语音合成缓存与播放协调
//!
//! 给定一行对白与说话角色：确定音色 → 构建规范化合成请求 → content key 去重 →
//! 内存 / 磁盘 / 远程合成服务 三级查找 → 播放。新的一行会打断并取代正在进行的一行。
//!
//! 领域层 (domain/):
//! - 对白行、音色、请求 key、WAV 解码（纯值与纯函数）
//!
//! 应用层 (application/):
//! - Ports: AudioStore, Synthesis, AudioOutput
//! - Speak 结果、播放状态、错误
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 磁盘缓存、HTTP 合成客户端、无声输出
//! - Cache: 内存 → 磁盘 两级缓存
//! - Playback: PlaybackCoordinator
//! - Events: 播放事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{AudioSource, PlaybackState, ResolveError, SpeakOutcome};
pub use config::{load_config, AppConfig};
pub use domain::{DialogueLine, SpeakerId, VoiceProfile};
pub use infrastructure::{PlaybackCoordinator, SpeakHandle};
