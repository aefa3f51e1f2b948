//! Text Command Handlers - 练习文本批量生成

use futures_util::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tokio::fs;

use crate::application::commands::GenerateText;
use crate::application::error::{ApplicationError, BatchReport};
use crate::domain::{
    build_group_stream, build_word_stream, cumulative_characters, ArtifactKind, DrillError,
};

/// GenerateText Handler
///
/// 每个 Segment 生成四个文本产物：重复版、单次版、新字符组、累积字符组。
/// 单个产物失败只记录在报告中，不影响其它产物。
pub struct GenerateTextHandler {
    /// 固定种子时输出可复现
    seed: Option<u64>,
}

impl GenerateTextHandler {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub async fn handle(&self, command: GenerateText) -> Result<BatchReport, ApplicationError> {
        // 目录必须在任何写入之前创建好，失败则整个流程中止
        for dir in [&command.segment_dir, &command.icrt_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ApplicationError::filesystem(dir, e))?;
        }

        let mut rng = self.rng();
        let mut report = BatchReport::default();

        for (index, segment) in command.segments.iter().enumerate() {
            let pool = segment.token_pool();
            let cumulative = cumulative_characters(&command.segments, index);
            let mut artifacts: Vec<(PathBuf, Result<String, DrillError>)> = Vec::with_capacity(4);

            // repetition == 1 时重复版与单次版同名，只写单次版
            if command.repetition != 1 {
                let kind = ArtifactKind::Repetitive(command.repetition);
                artifacts.push((
                    command.segment_dir.join(kind.file_name(&segment.name)),
                    build_word_stream(
                        &pool,
                        command.repetition,
                        command.target_segment_length,
                        &mut rng,
                    ),
                ));
            } else {
                tracing::debug!(
                    segment = %segment.name,
                    "Repetition is 1, skipping repetitive variant"
                );
            }

            artifacts.push((
                command.segment_dir.join(ArtifactKind::Single.file_name(&segment.name)),
                build_word_stream(&pool, 1, command.target_segment_length, &mut rng),
            ));
            artifacts.push((
                command.icrt_dir.join(ArtifactKind::DrillNew.file_name(&segment.name)),
                build_group_stream(
                    &segment.characters,
                    command.group_size,
                    command.target_icrt_length,
                    &mut rng,
                ),
            ));
            artifacts.push((
                command.icrt_dir.join(ArtifactKind::DrillCumulative.file_name(&segment.name)),
                build_group_stream(
                    &cumulative,
                    command.group_size,
                    command.target_icrt_length,
                    &mut rng,
                ),
            ));

            // 产物之间互不依赖，并发写入
            let writes = artifacts.into_iter().map(|(path, content)| async move {
                let result = match content {
                    Ok(text) => fs::write(&path, text)
                        .await
                        .map_err(|e| ApplicationError::filesystem(&path, e)),
                    Err(e) => Err(ApplicationError::from(e)),
                };
                (path, result)
            });

            for (path, result) in join_all(writes).await {
                match &result {
                    Ok(()) => tracing::debug!(path = %path.display(), "Text artifact written"),
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        category = %e.category(),
                        error = %e,
                        "Failed to generate text artifact"
                    ),
                }
                report.record(path, result);
            }

            tracing::info!(
                segment = %segment.name,
                tokens = pool.len(),
                characters = cumulative.len(),
                "Segment text generated"
            );
        }

        report.sort();
        Ok(report)
    }
}
