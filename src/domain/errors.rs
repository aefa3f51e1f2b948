//! Drill Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    #[error("素材池为空，无法生成长度为 {target} 的内容")]
    EmptyPool { target: usize },

    #[error("重复次数必须大于 0")]
    ZeroRepetition,

    #[error("字符组大小必须大于 0")]
    ZeroGroupSize,

    #[error("无效的速度配置 {wpm}@{farnsworth}: {reason}")]
    InvalidSpeed {
        wpm: u32,
        farnsworth: u32,
        reason: &'static str,
    },
}
