//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_transcoder;
mod morse_encoder;

pub use audio_transcoder::{AudioTranscoderPort, TranscodeError};
pub use morse_encoder::{AudioContainerPort, EncodeError, MorseEncoderPort, SampleBuffer};
