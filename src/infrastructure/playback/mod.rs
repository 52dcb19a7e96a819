//! Playback - 对白播放编排

mod coordinator;

pub use coordinator::{PlaybackCoordinator, SpeakHandle};
