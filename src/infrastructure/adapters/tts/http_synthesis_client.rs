//! HTTP Synthesis Client - 调用外部 TTS HTTP 服务
//!
//! 实现 SynthesisPort trait
//!
//! 外部 TTS API:
//! POST https://texttospeech.googleapis.com/v1/text:synthesize?fields=audioContent&key=...
//! Request: {"audioConfig": {...}, "input": {"text": "..."}, "voice": {...}}  (JSON)
//! Response: {"audioContent": "<base64>"}

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{Credential, SynthesisError, SynthesisPort};

/// 合成服务响应体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: Option<String>,
}

/// HTTP 合成客户端配置
#[derive(Debug, Clone)]
pub struct HttpSynthesisClientConfig {
    /// 合成接口 URL
    pub endpoint: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 传输错误重试次数
    pub max_retries: u32,
}

impl Default for HttpSynthesisClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://texttospeech.googleapis.com/v1/text:synthesize".to_string(),
            timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl HttpSynthesisClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// HTTP 合成客户端
pub struct HttpSynthesisClient {
    client: Client,
    endpoint: Url,
    config: HttpSynthesisClientConfig,
}

impl HttpSynthesisClient {
    pub fn new(config: HttpSynthesisClientConfig) -> Result<Self, SynthesisError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| SynthesisError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn with_default_config() -> Result<Self, SynthesisError> {
        Self::new(HttpSynthesisClientConfig::default())
    }

    /// 带凭证的请求 URL（凭证作为 query 参数）
    fn request_url(&self, credential: &Credential) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("fields", "audioContent")
            .append_pair("key", credential.expose());
        url
    }

    async fn send_once(&self, url: &Url, payload: &[u8]) -> Result<Vec<u8>, SynthesisError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|e| {
                // reqwest 的错误信息包含 URL，去掉以免泄露凭证
                let e = e.without_url();
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::Transport(format!("Cannot connect to synthesis service: {}", e))
                } else {
                    SynthesisError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SynthesisError::Transport(format!("Failed to read body: {}", e.without_url())))?;

        decode_response(&body)
    }
}

/// 解析响应体中的 base64 audioContent
fn decode_response(body: &str) -> Result<Vec<u8>, SynthesisError> {
    let response: SynthesizeResponse = serde_json::from_str(body)
        .map_err(|e| SynthesisError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let content = response
        .audio_content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| SynthesisError::MalformedResponse("empty audioContent".to_string()))?;

    STANDARD
        .decode(content.trim())
        .map_err(|e| SynthesisError::MalformedResponse(format!("invalid base64: {}", e)))
}

#[async_trait]
impl SynthesisPort for HttpSynthesisClient {
    async fn synthesize(
        &self,
        payload: &[u8],
        credential: Option<&Credential>,
    ) -> Result<Vec<u8>, SynthesisError> {
        let credential = credential.ok_or(SynthesisError::ConfigurationMissing)?;
        let url = self.request_url(credential);

        tracing::debug!(
            endpoint = %self.endpoint,
            payload_len = payload.len(),
            "Sending synthesis request"
        );

        let mut attempt = 0u32;
        loop {
            match self.send_once(&url, payload).await {
                Ok(audio) => {
                    tracing::info!(audio_size = audio.len(), attempt, "Synthesis completed");
                    return Ok(audio);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::debug!(error = %e, attempt, "Synthesis request failed, retrying");
                    tokio::time::sleep(Duration::from_millis(200 * attempt as u64)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
