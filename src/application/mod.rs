//! 应用层 - 用例边界
//!
//! 包含：
//! - ports: 六边形架构端口定义（AudioStore、Synthesis、AudioOutput）
//! - outcome: Speak 结果与播放状态
//! - error: 应用层错误定义

pub mod error;
pub mod outcome;
pub mod ports;

pub use error::ResolveError;
pub use outcome::{AudioSource, PlaybackState, SpeakOutcome};
pub use ports::{
    AudioOutputPort, AudioStorePort, Credential, PersistenceError, PlaybackError, SynthesisError,
    SynthesisPort,
};
