//! Voice Profile Resolver
//!
//! 角色 → 音色 的数据驱动映射表，未知角色回退到默认音色

use std::collections::HashMap;

use super::VoiceProfile;
use crate::domain::line::SpeakerId;

/// 音色解析器
///
/// 纯映射，全函数（不会失败）
#[derive(Debug, Clone)]
pub struct VoiceProfileResolver {
    default: VoiceProfile,
    profiles: HashMap<SpeakerId, VoiceProfile>,
}

impl VoiceProfileResolver {
    pub fn new(default: VoiceProfile) -> Self {
        Self {
            default,
            profiles: HashMap::new(),
        }
    }

    pub fn with_profile(mut self, speaker: impl Into<SpeakerId>, profile: VoiceProfile) -> Self {
        self.profiles.insert(speaker.into(), profile);
        self
    }

    pub fn from_table(
        default: VoiceProfile,
        table: impl IntoIterator<Item = (SpeakerId, VoiceProfile)>,
    ) -> Self {
        Self {
            default,
            profiles: table.into_iter().collect(),
        }
    }

    pub fn resolve(&self, speaker: Option<&SpeakerId>) -> &VoiceProfile {
        speaker
            .and_then(|id| self.profiles.get(id))
            .unwrap_or(&self.default)
    }

    pub fn default_profile(&self) -> &VoiceProfile {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
