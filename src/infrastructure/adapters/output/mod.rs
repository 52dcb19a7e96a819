//! Output Adapter - 播放设备实现

mod silent_output;

pub use silent_output::SilentAudioOutput;
