//! Audio Command Handlers - 批量音频渲染
//!
//! 每个 (文本产物, 速度) 组合是一个独立任务：
//! 读取文本 → 合成波形 → 写 WAV 中间文件 → 转码 → 删除中间文件

use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::application::commands::RenderAudio;
use crate::application::error::{ApplicationError, BatchReport};
use crate::application::ports::{AudioContainerPort, AudioTranscoderPort, MorseEncoderPort};
use crate::config::AppConfig;
use crate::domain::{audio_base_path, is_text_artifact, with_extension, SpeedProfile};

/// 渲染配置
#[derive(Debug, Clone)]
pub struct RenderAudioConfig {
    /// 最大并发渲染数
    pub max_concurrent: usize,
    /// 目标比特率（kbps）
    pub bitrate_kbps: u32,
    /// 压缩音频扩展名
    pub extension: String,
    /// 转码失败时保留中间文件
    pub keep_failed_intermediate: bool,
}

impl From<&AppConfig> for RenderAudioConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_concurrent: config.render.max_concurrent,
            bitrate_kbps: config.audio.bitrate_kbps,
            extension: config.audio.extension.clone(),
            keep_failed_intermediate: config.audio.keep_failed_intermediate,
        }
    }
}

/// 单个渲染任务
#[derive(Debug, Clone)]
struct RenderJob {
    source: PathBuf,
    speed: SpeedProfile,
    /// 不含扩展名的输出路径
    base: PathBuf,
}

/// WAV 中间文件的作用域守卫
///
/// Drop 时删除文件，除非已显式删除或保留
struct IntermediateFile {
    path: PathBuf,
    armed: bool,
}

impl IntermediateFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn remove(mut self) -> Result<(), ApplicationError> {
        self.armed = false;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApplicationError::filesystem(&self.path, e)),
        }
    }

    fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for IntermediateFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove intermediate file"
                );
            }
        }
    }
}

/// 渲染单个任务所需的协作者（可在任务间克隆）
#[derive(Clone)]
struct Renderer {
    encoder: Arc<dyn MorseEncoderPort>,
    container: Arc<dyn AudioContainerPort>,
    transcoder: Arc<dyn AudioTranscoderPort>,
    bitrate_kbps: u32,
    extension: String,
    keep_failed_intermediate: bool,
}

impl Renderer {
    fn output_path(&self, job: &RenderJob) -> PathBuf {
        with_extension(&job.base, &self.extension)
    }

    async fn render(&self, job: &RenderJob) -> Result<PathBuf, ApplicationError> {
        let text = fs::read_to_string(&job.source)
            .await
            .map_err(|e| ApplicationError::filesystem(&job.source, e))?;

        // 波形合成是 CPU 密集型，放到阻塞线程池
        let encoder = self.encoder.clone();
        let speed = job.speed;
        let buffer = tokio::task::spawn_blocking(move || encoder.encode(&text, speed))
            .await
            .map_err(|e| ApplicationError::internal(format!("Encoder task failed: {}", e)))??;
        let container = self.container.serialize(&buffer)?;

        let intermediate =
            IntermediateFile::new(with_extension(&job.base, self.container.extension()));
        fs::write(intermediate.path(), &container)
            .await
            .map_err(|e| ApplicationError::filesystem(intermediate.path(), e))?;

        tracing::debug!(
            path = %intermediate.path().display(),
            duration_ms = buffer.duration_ms(),
            size = container.len(),
            "Intermediate written"
        );

        let output = self.output_path(job);
        let transcoded = self
            .transcoder
            .transcode(intermediate.path(), &output, self.bitrate_kbps)
            .await;

        match transcoded {
            Ok(()) => {
                intermediate.remove().await?;
                Ok(output)
            }
            Err(e) => {
                // 转码器可能已经以最终文件名写出了部分内容
                remove_partial_output(&output).await;
                if self.keep_failed_intermediate {
                    let kept = intermediate.keep();
                    tracing::warn!(
                        path = %kept.display(),
                        "Keeping intermediate after failed transcode"
                    );
                }
                Err(e.into())
            }
        }
    }
}

/// 删除转码失败时残留的输出文件
async fn remove_partial_output(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partial output"
        ),
    }
}

/// RenderAudio Handler
///
/// 使用 semaphore 控制并发，单个任务失败不影响其它任务
pub struct RenderAudioHandler {
    max_concurrent: usize,
    renderer: Renderer,
}

impl RenderAudioHandler {
    pub fn new(
        config: RenderAudioConfig,
        encoder: Arc<dyn MorseEncoderPort>,
        container: Arc<dyn AudioContainerPort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
    ) -> Self {
        Self {
            max_concurrent: config.max_concurrent.max(1),
            renderer: Renderer {
                encoder,
                container,
                transcoder,
                bitrate_kbps: config.bitrate_kbps,
                extension: config.extension,
                keep_failed_intermediate: config.keep_failed_intermediate,
            },
        }
    }

    pub async fn handle(&self, command: RenderAudio) -> Result<BatchReport, ApplicationError> {
        let mut report = BatchReport::default();
        let mut jobs = Vec::new();

        for category in &command.categories {
            let files = match list_text_artifacts(&category.dir).await {
                Ok(files) => files,
                Err(e) => {
                    tracing::error!(
                        category = %category.label,
                        dir = %category.dir.display(),
                        error = %e,
                        "Failed to list text artifacts"
                    );
                    report.fail(&category.dir, e);
                    continue;
                }
            };

            for speed in &category.speeds {
                tracing::info!(
                    category = %category.label,
                    wpm = speed.wpm(),
                    farnsworth = speed.farnsworth(),
                    files = files.len(),
                    "Queueing audio renders"
                );
                jobs.extend(files.iter().map(|source| RenderJob {
                    source: source.clone(),
                    speed: *speed,
                    base: audio_base_path(source, speed),
                }));
            }
        }

        let total = jobs.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for job in jobs {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| ApplicationError::internal(format!("Semaphore closed: {}", e)))?;
            let renderer = self.renderer.clone();

            tasks.spawn(async move {
                let _permit = permit; // 持有 permit 直到任务完成

                let output = renderer.output_path(&job);
                let result = AssertUnwindSafe(renderer.render(&job))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| Err(ApplicationError::internal("Render task panicked")));

                match &result {
                    Ok(path) => tracing::info!(
                        source = %job.source.display(),
                        output = %path.display(),
                        speed = %job.speed,
                        "Audio rendered"
                    ),
                    Err(e) => tracing::error!(
                        source = %job.source.display(),
                        speed = %job.speed,
                        category = %e.category(),
                        error = %e,
                        "Audio render failed"
                    ),
                }
                (output, result.map(|_| ()))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((output, result)) => report.record(output, result),
                Err(e) => report.fail(
                    PathBuf::new(),
                    ApplicationError::internal(format!("Render task aborted: {}", e)),
                ),
            }
        }

        report.sort();
        tracing::info!(
            total,
            produced = report.produced.len(),
            failed = report.failures.len(),
            "Audio rendering finished"
        );
        Ok(report)
    }
}

/// 列出目录中的文本产物（按文件名排序）
///
/// 只取 `.txt`，已生成的音频不会被重新读取
async fn list_text_artifacts(dir: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ApplicationError::filesystem(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ApplicationError::filesystem(dir, e))?
    {
        let path = entry.path();
        if !is_text_artifact(&path) {
            continue;
        }
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ApplicationError::filesystem(&path, e))?;
        if file_type.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
