//! TTS Adapter - 合成服务客户端实现

mod fake_synthesis_client;
mod http_synthesis_client;

pub use fake_synthesis_client::{FakeResponse, FakeSynthesisClient};
pub use http_synthesis_client::*;
