//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（cwgen.toml / cwgen.json ...）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径（扩展名由 config crate 自动识别）
const CONFIG_FILE_NAMES: &[&str] = &["cwgen", "cwgen.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `CWGEN_`，层级分隔符 `__`）
/// 2. 配置文件（`config_path`，为 None 时搜索 cwgen.toml 或 cwgen.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `CWGEN_REPETITION=3`
/// - `CWGEN_GENERATION__SEED=42`
/// - `CWGEN_RENDER__MAX_CONCURRENT=8`
/// - `CWGEN_AUDIO__FFMPEG_PATH=/usr/local/bin/ffmpeg`
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("repetition", 2)?
        .set_default("target_segment_length", 1000)?
        .set_default("target_icrt_length", 500)?
        .set_default("output.segment_dir", "output/segments")?
        .set_default("output.icrt_dir", "output/icrt")?
        .set_default("generation.group_size", 5)?
        .set_default("audio.sample_rate", 8000)?
        .set_default("audio.ffmpeg_path", "ffmpeg")?
        .set_default("audio.codec", "libmp3lame")?
        .set_default("audio.extension", "mp3")?
        .set_default("audio.bitrate_kbps", 160)?
        .set_default("audio.transcode_timeout_secs", 300)?
        .set_default("audio.keep_failed_intermediate", false)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: CWGEN_AUDIO__BITRATE_KBPS=128
    builder = builder.add_source(
        Environment::with_prefix("CWGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.segments.is_empty() {
        return Err(invalid("At least one segment must be configured"));
    }

    // 单元名称直接用于文件名
    let mut names = HashSet::new();
    for segment in &config.segments {
        if segment.name.trim().is_empty() {
            return Err(invalid("Segment name cannot be empty"));
        }
        if segment.name.contains(['/', '\\']) {
            return Err(invalid(format!(
                "Segment name cannot contain path separators: {}",
                segment.name
            )));
        }
        if !names.insert(segment.name.as_str()) {
            return Err(invalid(format!("Duplicate segment name: {}", segment.name)));
        }
    }

    if config.repetition == 0 {
        return Err(invalid("Repetition must be at least 1"));
    }

    if config.generation.group_size == 0 {
        return Err(invalid("ICRT group size must be at least 1"));
    }

    if config.render.max_concurrent == 0 {
        return Err(invalid("Render concurrency must be at least 1"));
    }

    let audio = &config.audio;
    if audio.sample_rate == 0 {
        return Err(invalid("Sample rate cannot be 0"));
    }
    if !(audio.volume > 0.0 && audio.volume <= 1.0) {
        return Err(invalid(format!("Volume must be in (0, 1], got {}", audio.volume)));
    }
    if !(audio.tone_frequency > 0.0 && audio.tone_frequency < audio.sample_rate as f32 / 2.0) {
        return Err(invalid(format!(
            "Tone frequency {} Hz must be between 0 and the Nyquist frequency",
            audio.tone_frequency
        )));
    }
    if audio.ffmpeg_path.is_empty() || audio.codec.is_empty() {
        return Err(invalid("ffmpeg path and codec cannot be empty"));
    }
    if audio.extension.is_empty() || audio.extension.eq_ignore_ascii_case("wav") {
        return Err(invalid(
            "Compressed audio extension cannot be empty or wav (reserved for the intermediate)",
        ));
    }
    if audio.transcode_timeout_secs == 0 {
        return Err(invalid("Transcode timeout cannot be 0"));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Segments: {}", config.segments.len());
    tracing::info!("Repetition: {}x", config.repetition);
    tracing::info!("Target Segment Length: {}", config.target_segment_length);
    tracing::info!("Target ICRT Length: {}", config.target_icrt_length);
    tracing::info!("Segment Directory: {:?}", config.output.segment_dir);
    tracing::info!("ICRT Directory: {:?}", config.output.icrt_dir);
    tracing::info!("Segment Speeds: {:?}", speeds(&config.output.segment_speeds));
    tracing::info!("ICRT Speeds: {:?}", speeds(&config.output.icrt_speeds));
    tracing::info!("Group Size: {}", config.generation.group_size);
    match config.generation.seed {
        Some(seed) => tracing::info!("Seed: {}", seed),
        None => tracing::info!("Seed: <entropy>"),
    }
    tracing::info!(
        "Tone: {} Hz @ {} Hz sample rate",
        config.audio.tone_frequency,
        config.audio.sample_rate
    );
    tracing::info!(
        "Transcoder: {} ({}, {}k -> .{})",
        config.audio.ffmpeg_path,
        config.audio.codec,
        config.audio.bitrate_kbps,
        config.audio.extension
    );
    tracing::info!("Max Concurrent Renders: {}", config.render.max_concurrent);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

fn speeds(profiles: &[crate::domain::SpeedProfile]) -> Vec<String> {
    profiles.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Segment;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.segments = vec![Segment::new("1"), Segment::new("2")];
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_error_for_no_segments() {
        assert!(validate_config(&AppConfig::default()).is_err());
    }

    #[test]
    fn test_validation_error_for_duplicate_names() {
        let mut config = valid_config();
        config.segments.push(Segment::new("1"));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Duplicate segment name: 1"));
    }

    #[test]
    fn test_validation_error_for_path_in_name() {
        let mut config = valid_config();
        config.segments[0].name = "../escape".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_repetition() {
        let mut config = valid_config();
        config.repetition = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_group_size() {
        let mut config = valid_config();
        config.generation.group_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_concurrency() {
        let mut config = valid_config();
        config.render.max_concurrent = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_wav_extension() {
        let mut config = valid_config();
        config.audio.extension = "WAV".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_tone_above_nyquist() {
        let mut config = valid_config();
        config.audio.tone_frequency = 4000.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
repetition = 3
target_segment_length = 40

[output]
segment_dir = "out/seg"
segment_speeds = [[25, 15], [20, 20]]

[generation]
seed = 42

[[segments]]
name = "A"
words = ["the", "quick"]
characters = ["a", "b"]

[[segments]]
name = "B"
phrases = ["good morning"]
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.repetition, 3);
        assert_eq!(config.target_segment_length, 40);
        assert_eq!(config.target_icrt_length, 500);
        assert_eq!(config.output.segment_dir, std::path::PathBuf::from("out/seg"));
        assert_eq!(config.output.segment_speeds.len(), 2);
        assert_eq!(config.output.segment_speeds[0].wpm(), 25);
        assert_eq!(config.output.segment_speeds[0].farnsworth(), 15);
        assert_eq!(config.generation.seed, Some(42));
        assert_eq!(config.segments.len(), 2);
        assert_eq!(config.segments[0].words, vec!["the", "quick"]);
        assert!(config.segments[0].callsigns.is_empty());
        assert_eq!(config.segments[1].phrases, vec!["good morning"]);
    }

    #[test]
    fn test_load_rejects_invalid_speed() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[output]
icrt_speeds = [[10, 20]]

[[segments]]
name = "A"
"#
        )
        .unwrap();

        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/cwgen.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
