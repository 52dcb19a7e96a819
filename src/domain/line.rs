//! Dialogue Context - 对白行
//!
//! 由外部叙事运行器创建，每次 Speak 调用消费一次

use serde::{Deserialize, Serialize};

/// 说话角色标识（不透明）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerId(String);

impl SpeakerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpeakerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一行对白
///
/// 不变量: 创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    text: String,
    speaker: Option<SpeakerId>,
}

impl DialogueLine {
    pub fn new(text: impl Into<String>, speaker: Option<SpeakerId>) -> Self {
        Self {
            text: text.into(),
            speaker,
        }
    }

    /// 由指定角色说出的对白
    pub fn spoken_by(text: impl Into<String>, speaker: impl Into<SpeakerId>) -> Self {
        Self::new(text, Some(speaker.into()))
    }

    /// 无说话人的旁白（使用默认音色）
    pub fn narration(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn speaker(&self) -> Option<&SpeakerId> {
        self.speaker.as_ref()
    }

    /// 空文本或仅包含空白字符
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(DialogueLine::narration("").is_blank());
        assert!(DialogueLine::narration(" \t\n").is_blank());
        assert!(!DialogueLine::spoken_by("Hello there.", "Milton").is_blank());
    }

    #[test]
    fn test_speaker_accessors() {
        let line = DialogueLine::spoken_by("Hi", "Stella");
        assert_eq!(line.speaker().map(SpeakerId::as_str), Some("Stella"));
        assert_eq!(DialogueLine::narration("Hi").speaker(), None);
    }
}
