//! cwgen - 摩尔斯电码练习材料生成器
//!
//! 用法: `cwgen [配置文件]`
//! - 先为每个分段生成练习文本
//! - 再把每个文本按配置的速度渲染成音频

use std::path::PathBuf;
use std::sync::Arc;

use cwgen::application::Pipeline;
use cwgen::config::{load_config_from_path, print_config};
use cwgen::infrastructure::adapters::{
    CwToneConfig, CwToneEncoder, FfmpegTranscoder, FfmpegTranscoderConfig, WavContainer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config_from_path(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},cwgen={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("cwgen - 摩尔斯电码练习材料生成器");
    print_config(&config);

    // 创建适配器
    let encoder = Arc::new(CwToneEncoder::new(CwToneConfig::from(&config.audio)));
    let container = Arc::new(WavContainer::new());
    let transcoder = Arc::new(FfmpegTranscoder::new(FfmpegTranscoderConfig::from(
        &config.audio,
    )));

    let pipeline = Pipeline::new(Arc::new(config), encoder, container, transcoder);
    let report = pipeline.run().await?;

    for failure in report.text.failures.iter().chain(report.audio.failures.iter()) {
        tracing::error!(
            path = %failure.path.display(),
            category = %failure.error.category(),
            error = %failure.error,
            "Artifact failed"
        );
    }

    tracing::info!(
        text = report.text.produced.len(),
        audio = report.audio.produced.len(),
        failed = report.failure_count(),
        "Run finished"
    );

    if !report.is_success() {
        let counts: Vec<String> = report
            .text
            .failure_counts()
            .into_iter()
            .chain(report.audio.failure_counts())
            .map(|(category, count)| format!("{}={}", category, count))
            .collect();
        anyhow::bail!(
            "{} artifact(s) failed ({})",
            report.failure_count(),
            counts.join(", ")
        );
    }

    Ok(())
}
