//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（MorseEncoder、AudioContainer、AudioTranscoder）
//! - commands: 文本生成 / 音频渲染命令及处理器
//! - pipeline: 两阶段编排
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{GenerateTextHandler, RenderAudioConfig, RenderAudioHandler},
    GenerateText, RenderAudio, RenderCategory,
};

pub use error::{ApplicationError, ArtifactFailure, BatchReport, ErrorCategory};

pub use pipeline::{Pipeline, PipelineReport};

pub use ports::{
    AudioContainerPort, AudioTranscoderPort, EncodeError, MorseEncoderPort, SampleBuffer,
    TranscodeError,
};
