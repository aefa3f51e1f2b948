//! Audio Transcoder Port - 音频转码抽象
//!
//! 定义 WAV 到有损压缩格式（如 MP3）的转码接口

use async_trait::async_trait;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// 转码错误
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Failed to launch transcoder: {0}")]
    Launch(String),

    #[error("Transcoder exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("Transcoder timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid transcoder output: {0}")]
    InvalidOutput(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Transcoder Port
///
/// 每次调用都是独立的，输入输出路径互不重叠，可以安全并发调用
#[async_trait]
pub trait AudioTranscoderPort: Send + Sync {
    /// 转码音频文件
    ///
    /// # Arguments
    /// * `input` - 无损中间文件（WAV）
    /// * `output` - 压缩后的输出文件
    /// * `bitrate_kbps` - 目标比特率（kbps）
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        bitrate_kbps: u32,
    ) -> Result<(), TranscodeError>;
}
