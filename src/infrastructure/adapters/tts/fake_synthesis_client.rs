//! Fake Synthesis Client - 用于测试与离线运行的合成客户端
//!
//! 不访问网络，返回固定音频；可按调用顺序注入延迟或失败

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::application::ports::{Credential, SynthesisError, SynthesisPort};

/// 单次调用的脚本
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// 延迟后返回固定音频
    Audio { delay: Duration },
    /// 延迟后返回 HTTP 错误
    HttpStatus { delay: Duration, status: u16 },
    /// 挂起，直到 gate 被通知后返回固定音频
    Gated { gate: Arc<Notify> },
}

/// Fake Synthesis Client
///
/// 与真实客户端一样，没有凭证时直接返回 ConfigurationMissing，不计入调用次数
pub struct FakeSynthesisClient {
    audio: Vec<u8>,
    script: Mutex<VecDeque<FakeResponse>>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl FakeSynthesisClient {
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// 追加一次调用的行为，脚本耗尽后立即返回音频
    pub fn then(self, response: FakeResponse) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(response);
        }
        self
    }

    /// 已发起的网络调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已返回结果（未被取消）的调用次数
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> FakeResponse {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(FakeResponse::Audio {
                delay: Duration::ZERO,
            })
    }
}

#[async_trait]
impl SynthesisPort for FakeSynthesisClient {
    async fn synthesize(
        &self,
        payload: &[u8],
        credential: Option<&Credential>,
    ) -> Result<Vec<u8>, SynthesisError> {
        credential.ok_or(SynthesisError::ConfigurationMissing)?;
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let response = self.next_response();
        tracing::debug!(call, payload_len = payload.len(), response = ?response, "FakeSynthesisClient called");

        let result = match response {
            FakeResponse::Audio { delay } => {
                tokio::time::sleep(delay).await;
                Ok(self.audio.clone())
            }
            FakeResponse::Gated { gate } => {
                gate.notified().await;
                Ok(self.audio.clone())
            }
            FakeResponse::HttpStatus { delay, status } => {
                tokio::time::sleep(delay).await;
                Err(SynthesisError::HttpStatus {
                    status,
                    body: "fake failure".to_string(),
                })
            }
        };

        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}
