//! Audio Clip - WAV 解码
//!
//! 合成服务 (LINEAR16) 返回带 RIFF 头的 WAV，解析头部得到时长等信息。

use std::time::Duration;
use thiserror::Error;

/// 音频解码错误
#[derive(Debug, Error)]
pub enum AudioDecodeError {
    #[error("Audio data is empty")]
    Empty,

    #[error("Invalid WAV: {0}")]
    InvalidWav(&'static str),
}

/// 音频信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    /// 时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
    /// 声道数
    pub channels: u16,
    /// 位深度
    pub bits_per_sample: u16,
    /// PCM 数据大小（字节）
    pub data_size: usize,
}

/// 已解码的音频
///
/// 保留原始字节（写盘与播放都使用它），附带解析出的头信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    info: AudioInfo,
}

impl AudioClip {
    pub fn decode(bytes: Vec<u8>) -> Result<Self, AudioDecodeError> {
        if bytes.is_empty() {
            return Err(AudioDecodeError::Empty);
        }
        let info = parse_wav_header(&bytes)?;
        Ok(Self { bytes, info })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn info(&self) -> &AudioInfo {
        &self.info
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.info.duration_ms)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// 解析 WAV 文件头
fn parse_wav_header(data: &[u8]) -> Result<AudioInfo, AudioDecodeError> {
    if data.len() < 12 {
        return Err(AudioDecodeError::InvalidWav("data too short"));
    }
    if &data[0..4] != b"RIFF" {
        return Err(AudioDecodeError::InvalidWav("missing RIFF header"));
    }
    if &data[8..12] != b"WAVE" {
        return Err(AudioDecodeError::InvalidWav("missing WAVE identifier"));
    }

    let mut pos = 12;
    let mut fmt: Option<(u16, u32, u32, u16)> = None;
    let mut data_size: Option<usize> = None;

    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = read_u32(data, pos + 4) as usize;
        let body = pos + 8;

        match chunk_id {
            b"fmt " => {
                if chunk_size < 16 || body + 16 > data.len() {
                    return Err(AudioDecodeError::InvalidWav("truncated fmt chunk"));
                }
                let channels = read_u16(data, body + 2);
                let sample_rate = read_u32(data, body + 4);
                let byte_rate = read_u32(data, body + 8);
                let bits_per_sample = read_u16(data, body + 14);
                fmt = Some((channels, sample_rate, byte_rate, bits_per_sample));
            }
            b"data" => {
                // 流式编码器可能写入 0xFFFFFFFF，按实际长度截断
                data_size = Some(chunk_size.min(data.len() - body));
                break;
            }
            _ => {}
        }

        pos = body.saturating_add(chunk_size);
        // 对齐到偶数字节
        if chunk_size % 2 != 0 {
            pos = pos.saturating_add(1);
        }
    }

    let (channels, sample_rate, byte_rate, bits_per_sample) =
        fmt.ok_or(AudioDecodeError::InvalidWav("missing fmt chunk"))?;
    let data_size = data_size.ok_or(AudioDecodeError::InvalidWav("missing data chunk"))?;
    if byte_rate == 0 {
        return Err(AudioDecodeError::InvalidWav("byte rate is zero"));
    }

    Ok(AudioInfo {
        duration_ms: data_size as u64 * 1000 / byte_rate as u64,
        sample_rate,
        channels,
        bits_per_sample,
        data_size,
    })
}

/// 构造 16-bit 单声道 WAV，采样率 1000Hz，`millis` 毫秒静音
#[cfg(test)]
pub(crate) fn test_wav(millis: u32) -> Vec<u8> {
    let sample_rate = 1000u32;
    let data_size = millis * 2;
    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.resize(44 + data_size as usize, 0);
    wav
}
