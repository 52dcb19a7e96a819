//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音调范围（半音）
const PITCH_RANGE: std::ops::RangeInclusive<f32> = -20.0..=20.0;

/// 语速范围
const SPEAKING_RATE_RANGE: std::ops::RangeInclusive<f32> = 0.25..=4.0;

/// 音色参数
///
/// 进程级只读配置，由 VoiceProfileResolver 按说话人查找
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// 合成服务的音色名称，如 `en-GB-Wavenet-B`
    pub voice_name: String,

    /// 音调 (-20 - 20)
    #[serde(default)]
    pub pitch: f32,

    /// 语速 (0.25 - 4.0)
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,

    /// 语言代码，缺省时从音色名称推导
    #[serde(default)]
    pub language_code: Option<String>,
}

fn default_speaking_rate() -> f32 {
    1.0
}

impl VoiceProfile {
    pub fn new(voice_name: impl Into<String>) -> Self {
        Self {
            voice_name: voice_name.into(),
            pitch: 0.0,
            speaking_rate: default_speaking_rate(),
            language_code: None,
        }
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_speaking_rate(mut self, speaking_rate: f32) -> Self {
        self.speaking_rate = speaking_rate;
        self
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    /// 语言代码
    ///
    /// 未显式配置时取音色名称的前两段: `en-GB-Wavenet-B` → `en-GB`
    pub fn language_code(&self) -> String {
        if let Some(code) = &self.language_code {
            return code.clone();
        }
        let mut parts = self.voice_name.splitn(3, '-');
        match (parts.next(), parts.next()) {
            (Some(lang), Some(region)) => format!("{}-{}", lang, region),
            _ => self.voice_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.voice_name.trim().is_empty() {
            return Err("voice name cannot be empty");
        }
        if !self.pitch.is_finite() || !PITCH_RANGE.contains(&self.pitch) {
            return Err("pitch must be between -20 and 20");
        }
        if !self.speaking_rate.is_finite() || !SPEAKING_RATE_RANGE.contains(&self.speaking_rate) {
            return Err("speaking rate must be between 0.25 and 4.0");
        }
        Ok(())
    }
}
