//! Synthesis Request - 规范化合成请求
//!
//! 将 (text, voice profile) 序列化为固定字段顺序的 JSON 载荷，
//! 并以 md5(payload) 作为 content key。content key 是所有缓存层唯一的身份标识。

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::voice::VoiceProfile;

/// 请求构建错误
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Text is empty")]
    EmptyText,

    #[error("Invalid voice profile '{voice}': {reason}")]
    InvalidProfile { voice: String, reason: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 内容哈希 key (128-bit md5，小写十六进制)
///
/// 只能由 `from_payload` 构造；反序列化时校验格式，key 会被拼接为缓存文件名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentKey(String);

impl ContentKey {
    /// 对规范化载荷求哈希
    pub fn from_payload(payload: &[u8]) -> Self {
        Self(format!("{:x}", md5::compute(payload)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ContentKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let is_md5_hex =
            raw.len() == 32 && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !is_md5_hex {
            return Err(de::Error::custom(format!("invalid content key: {:?}", raw)));
        }
        Ok(Self(raw))
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 合成服务请求体
///
/// 字段声明顺序即序列化顺序，不能调整
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    audio_config: AudioConfigBody<'a>,
    input: InputBody<'a>,
    voice: VoiceBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfigBody<'a> {
    audio_encoding: &'a str,
    pitch: f32,
    speaking_rate: f32,
}

#[derive(Debug, Serialize)]
struct InputBody<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceBody<'a> {
    language_code: String,
    name: &'a str,
}

/// 规范化后的合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    payload: Vec<u8>,
    key: ContentKey,
}

impl SynthesisRequest {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn key(&self) -> &ContentKey {
        &self.key
    }
}

/// 请求 key 构建器
///
/// 相同的 (text, profile) 在任何机器、任何进程中都得到相同的载荷字节与 key
#[derive(Debug, Clone)]
pub struct RequestKeyBuilder {
    audio_encoding: String,
}

impl Default for RequestKeyBuilder {
    fn default() -> Self {
        Self::new("LINEAR16")
    }
}

impl RequestKeyBuilder {
    pub fn new(audio_encoding: impl Into<String>) -> Self {
        Self {
            audio_encoding: audio_encoding.into(),
        }
    }

    pub fn audio_encoding(&self) -> &str {
        &self.audio_encoding
    }

    pub fn build_key(
        &self,
        text: &str,
        profile: &VoiceProfile,
    ) -> Result<SynthesisRequest, RequestError> {
        if text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        // NaN 会被序列化为 null，不同参数可能得到相同的 key
        profile
            .validate()
            .map_err(|reason| RequestError::InvalidProfile {
                voice: profile.voice_name.clone(),
                reason,
            })?;

        // `+ 0.0` 把 -0.0 归一为 0.0，否则两者序列化结果不同
        let body = SynthesizeBody {
            audio_config: AudioConfigBody {
                audio_encoding: &self.audio_encoding,
                pitch: profile.pitch + 0.0,
                speaking_rate: profile.speaking_rate + 0.0,
            },
            input: InputBody { text },
            voice: VoiceBody {
                language_code: profile.language_code(),
                name: &profile.voice_name,
            },
        };

        let payload = serde_json::to_vec(&body)?;
        let key = ContentKey::from_payload(&payload);

        Ok(SynthesisRequest { payload, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milton() -> VoiceProfile {
        VoiceProfile::new("en-GB-Wavenet-B")
    }

    #[test]
    fn test_build_key_is_deterministic() {
        let builder = RequestKeyBuilder::default();
        let a = builder.build_key("Hello there.", &milton()).unwrap();
        let b = builder.build_key("Hello there.", &milton()).unwrap();
        assert_eq!(a.payload(), b.payload());
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().as_str().len(), 32);
    }

    #[test]
    fn test_payload_layout() {
        let builder = RequestKeyBuilder::default();
        let request = builder.build_key("Hello there.", &milton()).unwrap();
        let payload = std::str::from_utf8(request.payload()).unwrap();
        assert_eq!(
            payload,
            r#"{"audioConfig":{"audioEncoding":"LINEAR16","pitch":0.0,"speakingRate":1.0},"input":{"text":"Hello there."},"voice":{"languageCode":"en-GB","name":"en-GB-Wavenet-B"}}"#
        );
        assert_eq!(request.key(), &ContentKey::from_payload(request.payload()));
    }

    #[test]
    fn test_text_with_quotes_is_escaped() {
        let builder = RequestKeyBuilder::default();
        let request = builder
            .build_key("She said \"run\"\n", &milton())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(request.payload()).unwrap();
        assert_eq!(value["input"]["text"], "She said \"run\"\n");
    }

    #[test]
    fn test_different_inputs_give_different_keys() {
        let builder = RequestKeyBuilder::default();
        let base = builder.build_key("Hello there.", &milton()).unwrap();
        let other_text = builder.build_key("Hello there!", &milton()).unwrap();
        let other_voice = builder
            .build_key("Hello there.", &VoiceProfile::new("en-US-Wavenet-F"))
            .unwrap();
        let other_rate = builder
            .build_key("Hello there.", &milton().with_speaking_rate(1.25))
            .unwrap();
        assert_ne!(base.key(), other_text.key());
        assert_ne!(base.key(), other_voice.key());
        assert_ne!(base.key(), other_rate.key());
    }

    #[test]
    fn test_rejects_blank_text_and_invalid_profile() {
        let builder = RequestKeyBuilder::default();
        assert!(matches!(
            builder.build_key("   ", &milton()),
            Err(RequestError::EmptyText)
        ));
        assert!(matches!(
            builder.build_key("Hi", &milton().with_pitch(f32::NAN)),
            Err(RequestError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_negative_zero_pitch_gives_same_key() {
        let builder = RequestKeyBuilder::default();
        let zero = builder.build_key("Hi", &milton()).unwrap();
        let negative_zero = builder.build_key("Hi", &milton().with_pitch(-0.0)).unwrap();
        assert_eq!(zero.payload(), negative_zero.payload());
        assert_eq!(zero.key(), negative_zero.key());
    }

    #[test]
    fn test_content_key_deserialize_accepts_only_md5_hex() {
        let key = ContentKey::from_payload(b"payload");
        let json = serde_json::to_string(&key).unwrap();
        let parsed: ContentKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);

        for bad in [
            r#""../../etc/passwd""#,
            r#""""#,
            r#""0123456789ABCDEF0123456789ABCDEF""#,
            r#""0123456789abcdef0123456789abcde""#,
        ] {
            assert!(
                serde_json::from_str::<ContentKey>(bad).is_err(),
                "{} should be rejected",
                bad
            );
        }
    }
}
