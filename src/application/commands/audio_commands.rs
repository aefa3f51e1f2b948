//! Audio Commands - 批量音频渲染

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::domain::SpeedProfile;

/// 一类文本产物（同一目录）及其对应的速度列表
#[derive(Debug, Clone)]
pub struct RenderCategory {
    /// 日志用标签
    pub label: String,
    pub dir: PathBuf,
    pub speeds: Vec<SpeedProfile>,
}

/// 批量渲染音频命令
#[derive(Debug, Clone)]
pub struct RenderAudio {
    pub categories: Vec<RenderCategory>,
}

impl From<&AppConfig> for RenderAudio {
    fn from(config: &AppConfig) -> Self {
        Self {
            categories: vec![
                RenderCategory {
                    label: "segment".to_string(),
                    dir: config.output.segment_dir.clone(),
                    speeds: config.output.segment_speeds.clone(),
                },
                RenderCategory {
                    label: "icrt".to_string(),
                    dir: config.output.icrt_dir.clone(),
                    speeds: config.output.icrt_speeds.clone(),
                },
            ],
        }
    }
}
