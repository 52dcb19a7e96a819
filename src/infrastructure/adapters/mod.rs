//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod output;
pub mod storage;
pub mod tts;

pub use output::*;
pub use storage::*;
pub use tts::*;
