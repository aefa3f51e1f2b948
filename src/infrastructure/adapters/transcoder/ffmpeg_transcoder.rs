//! FFmpeg Transcoder - 调用外部 ffmpeg 进行有损压缩
//!
//! 支持：
//! - 退出码检查，失败时携带 stderr
//! - 超时后终止子进程
//! - 使用 symphonia 校验输出文件可解码（防止截断文件被当作成功）
//! - 空输入（无样本）只要求输出文件存在

use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tokio::process::Command;

use crate::application::ports::{AudioTranscoderPort, TranscodeError};
use crate::config::AudioConfig;

/// stderr 保留的最大长度
const MAX_STDERR_CHARS: usize = 2000;

/// FFmpeg 转码器配置
#[derive(Debug, Clone)]
pub struct FfmpegTranscoderConfig {
    /// ffmpeg 可执行文件
    pub program: PathBuf,
    /// 音频编码器，例如 libmp3lame
    pub codec: String,
    /// 单次转码超时
    pub timeout: Duration,
}

impl Default for FfmpegTranscoderConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            codec: "libmp3lame".to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

impl From<&AudioConfig> for FfmpegTranscoderConfig {
    fn from(audio: &AudioConfig) -> Self {
        Self {
            program: PathBuf::from(&audio.ffmpeg_path),
            codec: audio.codec.clone(),
            timeout: Duration::from_secs(audio.transcode_timeout_secs),
        }
    }
}

/// FFmpeg 转码器
pub struct FfmpegTranscoder {
    config: FfmpegTranscoderConfig,
}

impl FfmpegTranscoder {
    pub fn new(config: FfmpegTranscoderConfig) -> Self {
        Self { config }
    }

    fn command(&self, input: &Path, output: &Path, bitrate_kbps: u32) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-codec:a", self.config.codec.as_str()])
            .arg("-b:a")
            .arg(format!("{}k", bitrate_kbps))
            .arg(output)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);
        command
    }
}

fn truncate_stderr(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_STDERR_CHARS {
        return trimmed.to_string();
    }
    let tail: String = trimmed
        .chars()
        .rev()
        .take(MAX_STDERR_CHARS)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("...{}", tail)
}

/// symphonia 探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioProbe {
    /// 默认音轨的帧数（若容器提供）
    pub frames: Option<u64>,
    /// 是否读到了至少一个数据包
    pub has_packets: bool,
}

/// 使用 symphonia 探测音频文件：能识别格式且有默认音轨
pub fn probe_audio_file(path: &Path) -> Result<AudioProbe, TranscodeError> {
    let file = File::open(path)
        .map_err(|e| TranscodeError::InvalidOutput(format!("{}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| TranscodeError::InvalidOutput(format!("Probe failed: {}", e)))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| TranscodeError::InvalidOutput("No audio track found".to_string()))?;
    let track_id = track.id;
    let frames = track.codec_params.n_frames;

    loop {
        match format.next_packet() {
            Ok(packet) if packet.track_id() == track_id => {
                return Ok(AudioProbe {
                    frames,
                    has_packets: true,
                })
            }
            Ok(_) => continue,
            Err(_) => {
                return Ok(AudioProbe {
                    frames,
                    has_packets: false,
                })
            }
        }
    }
}

/// 校验输出文件可解码，至少要能读出一个数据包
///
/// 返回默认音轨的帧数（若容器提供）
pub fn verify_audio_file(path: &Path) -> Result<Option<u64>, TranscodeError> {
    let probe = probe_audio_file(path)?;
    if !probe.has_packets {
        return Err(TranscodeError::InvalidOutput(format!(
            "No audio packets: {}",
            path.display()
        )));
    }
    Ok(probe.frames)
}

/// 校验一次转码的结果
///
/// 输入本身没有样本时（空文本），输出只需存在；否则输出必须能解码出数据包。
pub fn verify_transcode(input: &Path, output: &Path) -> Result<Option<u64>, TranscodeError> {
    let input_is_empty = matches!(
        probe_audio_file(input),
        Ok(AudioProbe {
            has_packets: false,
            ..
        })
    );
    if !input_is_empty {
        return verify_audio_file(output);
    }

    match std::fs::metadata(output) {
        Ok(meta) if meta.is_file() => Ok(Some(0)),
        Ok(_) => Err(TranscodeError::InvalidOutput(format!(
            "{} is not a file",
            output.display()
        ))),
        Err(e) => Err(TranscodeError::InvalidOutput(format!(
            "{}: {}",
            output.display(),
            e
        ))),
    }
}

#[async_trait]
impl AudioTranscoderPort for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        bitrate_kbps: u32,
    ) -> Result<(), TranscodeError> {
        let child = self
            .command(input, output, bitrate_kbps)
            .output();

        // 超时时 future 被丢弃，kill_on_drop 终止子进程
        let result = tokio::time::timeout(self.config.timeout, child)
            .await
            .map_err(|_| TranscodeError::Timeout(self.config.timeout))?
            .map_err(|e| {
                TranscodeError::Launch(format!("{}: {}", self.config.program.display(), e))
            })?;

        if !result.status.success() {
            return Err(TranscodeError::Failed {
                status: result.status,
                stderr: truncate_stderr(&result.stderr),
            });
        }

        if !result.stderr.is_empty() {
            tracing::warn!(
                output = %output.display(),
                stderr = %truncate_stderr(&result.stderr),
                "Transcoder reported errors despite success"
            );
        }

        let (input_path, output_path) = (input.to_path_buf(), output.to_path_buf());
        let frames = tokio::task::spawn_blocking(move || verify_transcode(&input_path, &output_path))
            .await
            .map_err(|e| TranscodeError::IoError(format!("Verification task failed: {}", e)))??;

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            bitrate_kbps,
            frames = ?frames,
            "Transcoded"
        );

        Ok(())
    }
}
