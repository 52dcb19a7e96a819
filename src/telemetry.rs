//! Logging bootstrap
//!
//! 宿主应用启动时调用一次；`RUST_LOG` 优先于配置中的日志级别

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 安装全局 tracing subscriber
///
/// 已经安装过 subscriber 时返回错误而不是 panic
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let log_filter = format!("{},voiceline={}", config.level, config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
