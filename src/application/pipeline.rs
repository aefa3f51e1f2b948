//! Pipeline - 文本生成 + 音频渲染编排

use std::sync::Arc;

use crate::application::commands::handlers::{
    GenerateTextHandler, RenderAudioConfig, RenderAudioHandler,
};
use crate::application::commands::{GenerateText, RenderAudio};
use crate::application::error::{ApplicationError, BatchReport};
use crate::application::ports::{AudioContainerPort, AudioTranscoderPort, MorseEncoderPort};
use crate::config::AppConfig;

/// 一次完整运行的结果
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub text: BatchReport,
    pub audio: BatchReport,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.text.is_success() && self.audio.is_success()
    }

    pub fn failure_count(&self) -> usize {
        self.text.failures.len() + self.audio.failures.len()
    }
}

/// 编排器：先生成全部文本，再渲染音频
pub struct Pipeline {
    config: Arc<AppConfig>,
    text_handler: GenerateTextHandler,
    audio_handler: RenderAudioHandler,
}

impl Pipeline {
    pub fn new(
        config: Arc<AppConfig>,
        encoder: Arc<dyn MorseEncoderPort>,
        container: Arc<dyn AudioContainerPort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
    ) -> Self {
        let text_handler = GenerateTextHandler::new(config.generation.seed);
        let audio_handler = RenderAudioHandler::new(
            RenderAudioConfig::from(config.as_ref()),
            encoder,
            container,
            transcoder,
        );
        Self {
            config,
            text_handler,
            audio_handler,
        }
    }

    /// 运行完整流程
    ///
    /// 只有目录创建失败会中止；其余失败汇总在报告中
    pub async fn run(&self) -> Result<PipelineReport, ApplicationError> {
        tracing::info!(segments = self.config.segments.len(), "Generating text artifacts");
        let text = self
            .text_handler
            .handle(GenerateText::from(self.config.as_ref()))
            .await?;
        tracing::info!(
            produced = text.produced.len(),
            failed = text.failures.len(),
            "Text generation finished"
        );

        // 渲染阶段读取文本阶段写出的目录，必须在其完成之后开始
        tracing::info!("Rendering audio artifacts");
        let audio = self
            .audio_handler
            .handle(RenderAudio::from(self.config.as_ref()))
            .await?;

        Ok(PipelineReport { text, audio })
    }
}
