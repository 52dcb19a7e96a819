//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{SpeakerId, VoiceProfile, VoiceProfileResolver};
use crate::infrastructure::adapters::{DiskStoreConfig, HttpSynthesisClientConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 缓存目录配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 合成服务配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 音色映射表
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 缓存目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 缓存目录（同时存放凭证文件）
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// 缓存文件后缀
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    /// 凭证文件名
    #[serde(default = "default_credential_file")]
    pub credential_file: String,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("Assets/Resources/Cache")
}

fn default_file_suffix() -> String {
    ".cachedata".to_string()
}

fn default_credential_file() -> String {
    "apikey.txt".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            file_suffix: default_file_suffix(),
            credential_file: default_credential_file(),
        }
    }
}

impl CacheConfig {
    pub fn disk_store_config(&self) -> DiskStoreConfig {
        DiskStoreConfig {
            cache_dir: self.dir.clone(),
            file_suffix: self.file_suffix.clone(),
            credential_file: self.credential_file.clone(),
        }
    }

    pub fn credential_path(&self) -> PathBuf {
        self.dir.join(&self.credential_file)
    }
}

/// 合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 合成接口 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 传输错误最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 音频编码，参与 content key 计算
    #[serde(default = "default_audio_encoding")]
    pub audio_encoding: String,
}

fn default_endpoint() -> String {
    "https://texttospeech.googleapis.com/v1/text:synthesize".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_audio_encoding() -> String {
    "LINEAR16".to_string()
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            audio_encoding: default_audio_encoding(),
        }
    }
}

impl SynthesisConfig {
    pub fn client_config(&self) -> HttpSynthesisClientConfig {
        HttpSynthesisClientConfig::new(self.endpoint.clone())
            .with_timeout(self.timeout_secs)
            .with_max_retries(self.max_retries)
    }
}

/// 单个角色的音色
///
/// TOML 示例:
/// ```toml
/// [[voices.speakers]]
/// speaker = "Milton"
/// voice_name = "en-GB-Wavenet-B"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerVoice {
    pub speaker: String,
    pub voice_name: String,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,
    #[serde(default)]
    pub language_code: Option<String>,
}

fn default_speaking_rate() -> f32 {
    1.0
}

impl SpeakerVoice {
    fn new(speaker: &str, voice_name: &str) -> Self {
        Self {
            speaker: speaker.to_string(),
            voice_name: voice_name.to_string(),
            pitch: 0.0,
            speaking_rate: default_speaking_rate(),
            language_code: None,
        }
    }

    pub fn profile(&self) -> VoiceProfile {
        VoiceProfile {
            voice_name: self.voice_name.clone(),
            pitch: self.pitch,
            speaking_rate: self.speaking_rate,
            language_code: self.language_code.clone(),
        }
    }
}

/// 音色映射表
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 未知角色与旁白使用的默认音色
    #[serde(default = "default_voice")]
    pub default: VoiceProfile,

    /// 角色 → 音色
    #[serde(default = "default_speakers")]
    pub speakers: Vec<SpeakerVoice>,
}

fn default_voice() -> VoiceProfile {
    VoiceProfile::new("en-US-Wavenet-A")
}

fn default_speakers() -> Vec<SpeakerVoice> {
    vec![
        SpeakerVoice::new("Milton", "en-GB-Wavenet-B"),
        SpeakerVoice::new("Stella", "en-US-Wavenet-F"),
        SpeakerVoice::new("Sally", "en-GB-Wavenet-C"),
        SpeakerVoice::new("Rusty", "en-GB-Standard-B"),
    ]
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            default: default_voice(),
            speakers: default_speakers(),
        }
    }
}

impl VoicesConfig {
    pub fn resolver(&self) -> VoiceProfileResolver {
        VoiceProfileResolver::from_table(
            self.default.clone(),
            self.speakers
                .iter()
                .map(|s| (SpeakerId::new(s.speaker.clone()), s.profile())),
        )
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
