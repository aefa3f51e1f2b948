//! WAV Container - 基于 hound 的 RIFF/WAV 序列化
//!
//! 输出 16 位 PCM 单声道

use std::io::Cursor;

use crate::application::ports::{AudioContainerPort, EncodeError, SampleBuffer};

const BITS_PER_SAMPLE: u16 = 16;

/// WAV 容器写入器
#[derive(Debug, Default, Clone, Copy)]
pub struct WavContainer;

impl WavContainer {
    pub fn new() -> Self {
        Self
    }
}

fn container_error(e: hound::Error) -> EncodeError {
    EncodeError::ContainerError(e.to_string())
}

impl AudioContainerPort for WavContainer {
    fn serialize(&self, buffer: &SampleBuffer) -> Result<Vec<u8>, EncodeError> {
        if buffer.sample_rate == 0 {
            return Err(EncodeError::InvalidParameter(
                "sample rate cannot be 0".to_string(),
            ));
        }

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: buffer.sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Int,
        };

        let mut wav = Vec::with_capacity(44 + buffer.samples.len() * 2);
        {
            let mut writer =
                hound::WavWriter::new(Cursor::new(&mut wav), spec).map_err(container_error)?;

            // f32 → i16
            for &sample in &buffer.samples {
                let clamped = sample.clamp(-1.0, 1.0);
                writer
                    .write_sample((clamped * i16::MAX as f32) as i16)
                    .map_err(container_error)?;
            }

            writer.finalize().map_err(container_error)?;
        }

        Ok(wav)
    }

    fn extension(&self) -> &'static str {
        "wav"
    }
}
