//! Text Commands - 练习文本生成

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::domain::Segment;

/// 生成全部练习文本命令
#[derive(Debug, Clone)]
pub struct GenerateText {
    pub segments: Vec<Segment>,
    pub repetition: u32,
    pub target_segment_length: usize,
    pub target_icrt_length: usize,
    pub group_size: usize,
    pub segment_dir: PathBuf,
    pub icrt_dir: PathBuf,
}

impl From<&AppConfig> for GenerateText {
    fn from(config: &AppConfig) -> Self {
        Self {
            segments: config.segments.clone(),
            repetition: config.repetition,
            target_segment_length: config.target_segment_length,
            target_icrt_length: config.target_icrt_length,
            group_size: config.generation.group_size,
            segment_dir: config.output.segment_dir.clone(),
            icrt_dir: config.output.icrt_dir.clone(),
        }
    }
}
