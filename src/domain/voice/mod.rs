//! Voice Context - 音色上下文
//!
//! 职责:
//! - 音色参数 (VoiceProfile)
//! - 角色 → 音色 映射 (VoiceProfileResolver)

mod resolver;
mod value_objects;

pub use resolver::VoiceProfileResolver;
pub use value_objects::VoiceProfile;
