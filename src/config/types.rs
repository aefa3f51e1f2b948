//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{Segment, SpeedProfile, DEFAULT_GROUP_SIZE};

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 练习单元（按难度递增排列）
    #[serde(default)]
    pub segments: Vec<Segment>,

    /// 重复练习文本中每个词的重复次数
    #[serde(default = "default_repetition")]
    pub repetition: u32,

    /// 单词练习文本的目标长度（字符）
    #[serde(default = "default_target_segment_length")]
    pub target_segment_length: usize,

    /// ICRT 练习文本的目标长度（字符）
    #[serde(default = "default_target_icrt_length")]
    pub target_icrt_length: usize,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 文本生成配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 渲染配置
    #[serde(default)]
    pub render: RenderConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

fn default_repetition() -> u32 {
    2
}

fn default_target_segment_length() -> usize {
    1000
}

fn default_target_icrt_length() -> usize {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            repetition: default_repetition(),
            target_segment_length: default_target_segment_length(),
            target_icrt_length: default_target_icrt_length(),
            output: OutputConfig::default(),
            generation: GenerationConfig::default(),
            audio: AudioConfig::default(),
            render: RenderConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// 单词练习输出目录
    #[serde(default = "default_segment_dir")]
    pub segment_dir: PathBuf,

    /// ICRT 练习输出目录
    #[serde(default = "default_icrt_dir")]
    pub icrt_dir: PathBuf,

    /// 单词练习音频速度，格式 `[[wpm, farnsworth], ...]`
    #[serde(default = "default_speeds")]
    pub segment_speeds: Vec<SpeedProfile>,

    /// ICRT 练习音频速度
    #[serde(default = "default_speeds")]
    pub icrt_speeds: Vec<SpeedProfile>,
}

fn default_segment_dir() -> PathBuf {
    PathBuf::from("output/segments")
}

fn default_icrt_dir() -> PathBuf {
    PathBuf::from("output/icrt")
}

fn default_speeds() -> Vec<SpeedProfile> {
    SpeedProfile::new(20, 10).into_iter().collect()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            segment_dir: default_segment_dir(),
            icrt_dir: default_icrt_dir(),
            segment_speeds: default_speeds(),
            icrt_speeds: default_speeds(),
        }
    }
}

/// 文本生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// ICRT 字符组大小
    #[serde(default = "default_group_size")]
    pub group_size: usize,

    /// 随机种子；未设置时使用系统熵源
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
            seed: None,
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// 采样率（Hz）
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// 音调频率（Hz）
    #[serde(default = "default_tone_frequency")]
    pub tone_frequency: f32,

    /// 音量 (0, 1]
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// ffmpeg 可执行文件
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// ffmpeg 音频编码器
    #[serde(default = "default_codec")]
    pub codec: String,

    /// 压缩音频扩展名
    #[serde(default = "default_extension")]
    pub extension: String,

    /// 目标比特率（kbps）
    #[serde(default = "default_bitrate_kbps")]
    pub bitrate_kbps: u32,

    /// 单次转码超时（秒）
    #[serde(default = "default_transcode_timeout")]
    pub transcode_timeout_secs: u64,

    /// 转码失败时保留 WAV 中间文件（用于排查）
    #[serde(default)]
    pub keep_failed_intermediate: bool,
}

fn default_sample_rate() -> u32 {
    8000
}

fn default_tone_frequency() -> f32 {
    550.0
}

fn default_volume() -> f32 {
    0.8
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_codec() -> String {
    "libmp3lame".to_string()
}

fn default_extension() -> String {
    "mp3".to_string()
}

fn default_bitrate_kbps() -> u32 {
    160
}

fn default_transcode_timeout() -> u64 {
    300 // 5 分钟
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            tone_frequency: default_tone_frequency(),
            volume: default_volume(),
            ffmpeg_path: default_ffmpeg_path(),
            codec: default_codec(),
            extension: default_extension(),
            bitrate_kbps: default_bitrate_kbps(),
            transcode_timeout_secs: default_transcode_timeout(),
            keep_failed_intermediate: false,
        }
    }
}

/// 渲染配置
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// 最大并发渲染数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_max_concurrent() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.segments.is_empty());
        assert_eq!(config.repetition, 2);
        assert_eq!(config.output.segment_dir, PathBuf::from("output/segments"));
        assert_eq!(config.output.segment_speeds, vec![SpeedProfile::new(20, 10).unwrap()]);
        assert_eq!(config.generation.group_size, 5);
        assert_eq!(config.audio.extension, "mp3");
        assert_eq!(config.audio.bitrate_kbps, 160);
        assert!(config.render.max_concurrent >= 1);
    }
}
