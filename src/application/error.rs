//! 应用层错误定义
//!
//! 统一的命令错误类型，以及批处理的失败汇总

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::ports::{EncodeError, TranscodeError};
use crate::domain::DrillError;

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    /// 配置错误（素材缺失、参数非法）
    Config,
    /// 文件系统错误
    Filesystem,
    /// 外部工具错误（编码器 / 转码器）
    ExternalTool,
    /// 内部错误
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Filesystem => write!(f, "filesystem"),
            ErrorCategory::ExternalTool => write!(f, "external-tool"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 配置 / 素材错误
    #[error("Configuration error: {0}")]
    Config(#[from] DrillError),

    /// 文件系统错误
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 波形合成 / 容器序列化错误
    #[error("Encoder error: {0}")]
    Encode(#[from] EncodeError),

    /// 转码错误
    #[error("Transcoder error: {0}")]
    Transcode(#[from] TranscodeError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建文件系统错误
    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApplicationError::Config(_) => ErrorCategory::Config,
            ApplicationError::Filesystem { .. } => ErrorCategory::Filesystem,
            ApplicationError::Encode(_) | ApplicationError::Transcode(_) => {
                ErrorCategory::ExternalTool
            }
            ApplicationError::InternalError(_) => ErrorCategory::Internal,
        }
    }
}

/// 单个产物的失败记录
#[derive(Debug)]
pub struct ArtifactFailure {
    pub path: PathBuf,
    pub error: ApplicationError,
}

/// 批处理结果：成功产物 + 失败列表
#[derive(Debug, Default)]
pub struct BatchReport {
    pub produced: Vec<PathBuf>,
    pub failures: Vec<ArtifactFailure>,
}

impl BatchReport {
    pub fn record(&mut self, path: PathBuf, result: Result<(), ApplicationError>) {
        match result {
            Ok(()) => self.produced.push(path),
            Err(error) => self.failures.push(ArtifactFailure { path, error }),
        }
    }

    pub fn fail(&mut self, path: impl Into<PathBuf>, error: ApplicationError) {
        self.failures.push(ArtifactFailure {
            path: path.into(),
            error,
        });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// 按分类统计失败数
    pub fn failure_counts(&self) -> Vec<(ErrorCategory, usize)> {
        let mut counts: Vec<(ErrorCategory, usize)> = Vec::new();
        for failure in &self.failures {
            let category = failure.error.category();
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, n)) => *n += 1,
                None => counts.push((category, 1)),
            }
        }
        counts.sort();
        counts
    }

    /// 排序，使并发执行的结果顺序稳定
    pub fn sort(&mut self) {
        self.produced.sort();
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let config: ApplicationError = DrillError::ZeroGroupSize.into();
        assert_eq!(config.category(), ErrorCategory::Config);

        let fs = ApplicationError::filesystem(
            "out",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(fs.category(), ErrorCategory::Filesystem);
        assert!(fs.to_string().contains("out"));

        let tool: ApplicationError = TranscodeError::Launch("ffmpeg".into()).into();
        assert_eq!(tool.category(), ErrorCategory::ExternalTool);

        assert_eq!(ApplicationError::internal("x").category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_batch_report_counts() {
        let mut report = BatchReport::default();
        report.record(PathBuf::from("b"), Ok(()));
        report.record(PathBuf::from("a"), Ok(()));
        report.fail("c", DrillError::ZeroRepetition.into());
        report.fail("d", ApplicationError::internal("boom"));
        report.fail("e", DrillError::ZeroGroupSize.into());

        assert!(!report.is_success());
        assert_eq!(
            report.failure_counts(),
            vec![(ErrorCategory::Config, 2), (ErrorCategory::Internal, 1)]
        );

        report.sort();
        assert_eq!(report.produced, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}
