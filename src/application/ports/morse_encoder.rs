//! Morse Encoder Port - 摩尔斯波形合成抽象
//!
//! 定义文本到音频样本的抽象接口，具体实现在 infrastructure/adapters 层

use thiserror::Error;

use crate::domain::SpeedProfile;

/// 编码错误
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid encoder parameter: {0}")]
    InvalidParameter(String),

    #[error("Container error: {0}")]
    ContainerError(String),
}

/// 单声道音频样本
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    /// 取值范围 [-1, 1]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }
}

/// Morse Encoder Port
///
/// 给定文本和发报速度，生成音频样本。实现必须是确定性的。
pub trait MorseEncoderPort: Send + Sync {
    fn encode(&self, text: &str, speed: SpeedProfile) -> Result<SampleBuffer, EncodeError>;
}

/// Audio Container Port
///
/// 将样本序列化为可播放的无损容器（WAV）
pub trait AudioContainerPort: Send + Sync {
    fn serialize(&self, buffer: &SampleBuffer) -> Result<Vec<u8>, EncodeError>;

    /// 容器文件扩展名
    fn extension(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_ms() {
        let buffer = SampleBuffer::new(vec![0.0; 8000], 8000);
        assert_eq!(buffer.duration_ms(), 1000);
        assert_eq!(SampleBuffer::default().duration_ms(), 0);
        assert!(SampleBuffer::default().is_empty());
    }
}
