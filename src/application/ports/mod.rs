//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_output;
mod audio_store;
mod synthesis;

pub use audio_output::{AudioOutputPort, PlaybackError};
pub use audio_store::{AudioStorePort, PersistenceError};
pub use synthesis::{Credential, SynthesisError, SynthesisPort};
