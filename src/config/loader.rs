//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（voiceline.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["voiceline", "voiceline.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOICELINE_CACHE__DIR=/data/voice-cache`
/// - `VOICELINE_SYNTHESIS__TIMEOUT_SECS=10`
/// - `VOICELINE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("cache.dir", "Assets/Resources/Cache")?
        .set_default("cache.file_suffix", ".cachedata")?
        .set_default("cache.credential_file", "apikey.txt")?
        .set_default(
            "synthesis.endpoint",
            "https://texttospeech.googleapis.com/v1/text:synthesize",
        )?
        .set_default("synthesis.timeout_secs", 30)?
        .set_default("synthesis.max_retries", 0)?
        .set_default("synthesis.audio_encoding", "LINEAR16")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: VOICELINE_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("VOICELINE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.synthesis.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "Synthesis endpoint cannot be empty".to_string(),
        ));
    }

    if config.synthesis.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Synthesis timeout cannot be 0".to_string(),
        ));
    }

    if config.cache.credential_file.is_empty() {
        return Err(ConfigError::ValidationError(
            "Credential file name cannot be empty".to_string(),
        ));
    }

    config.voices.default.validate().map_err(|e| {
        ConfigError::ValidationError(format!("Default voice: {}", e))
    })?;

    for speaker in &config.voices.speakers {
        speaker.profile().validate().map_err(|e| {
            ConfigError::ValidationError(format!("Voice for '{}': {}", speaker.speaker, e))
        })?;
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出凭证内容
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Voiceline Configuration ===");
    tracing::info!("Cache Directory: {:?}", config.cache.dir);
    tracing::info!("Credential File: {:?}", config.cache.credential_path());
    tracing::info!("Synthesis Endpoint: {}", config.synthesis.endpoint);
    tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
    tracing::info!("Synthesis Retries: {}", config.synthesis.max_retries);
    tracing::info!("Default Voice: {}", config.voices.default.voice_name);
    tracing::info!("Speaker Voices: {}", config.voices.speakers.len());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("===============================");
}
