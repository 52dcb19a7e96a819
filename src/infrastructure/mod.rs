//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现与播放编排

pub mod adapters;
pub mod cache;
pub mod events;
pub mod playback;

pub use cache::TieredAudioCache;
pub use events::EventPublisher;
pub use playback::{PlaybackCoordinator, SpeakHandle};
