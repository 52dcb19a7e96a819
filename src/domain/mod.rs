//! Domain Layer - 领域层
//!
//! 纯值类型与纯函数组件，不做任何 I/O:
//! - line: 对白行与说话人
//! - voice: 音色参数与角色映射
//! - request: 规范化合成请求与 content key
//! - audio: 音频解码

pub mod audio;
pub mod line;
pub mod request;
pub mod voice;

pub use audio::{AudioClip, AudioDecodeError, AudioInfo};
pub use line::{DialogueLine, SpeakerId};
pub use request::{ContentKey, RequestError, RequestKeyBuilder, SynthesisRequest};
pub use voice::{VoiceProfile, VoiceProfileResolver};
