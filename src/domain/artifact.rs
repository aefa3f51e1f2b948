//! Artifact - 生成文件的命名规则

use std::path::{Path, PathBuf};

use super::speed::SpeedProfile;

/// 文本文件扩展名
pub const TEXT_EXTENSION: &str = "txt";

/// 文本产物类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// 每个词重复 n 次
    Repetitive(u32),
    /// 每个词只出现一次
    Single,
    /// 本单元新字符的字符组练习
    DrillNew,
    /// 截至本单元所有字符的字符组练习
    DrillCumulative,
}

impl ArtifactKind {
    /// 文件名（不含目录）
    pub fn file_name(&self, segment_name: &str) -> String {
        match self {
            ArtifactKind::Repetitive(n) => format!("segment_{segment_name}_{n}x.{TEXT_EXTENSION}"),
            ArtifactKind::Single => format!("segment_{segment_name}_1x.{TEXT_EXTENSION}"),
            ArtifactKind::DrillNew => format!("icrt_{segment_name}_new.{TEXT_EXTENSION}"),
            ArtifactKind::DrillCumulative => format!("icrt_{segment_name}_all.{TEXT_EXTENSION}"),
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Repetitive(n) => write!(f, "repetitive-{n}x"),
            ArtifactKind::Single => write!(f, "single"),
            ArtifactKind::DrillNew => write!(f, "drill-new"),
            ArtifactKind::DrillCumulative => write!(f, "drill-cumulative"),
        }
    }
}

/// 音频产物路径（不含扩展名）：`{dir}/{stem}_{wpm}@{farnsworth}`
pub fn audio_base_path(text_path: &Path, speed: &SpeedProfile) -> PathBuf {
    let stem = text_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    text_path.with_file_name(format!("{stem}{}", speed.file_suffix()))
}

/// 在基础路径后追加扩展名
///
/// 不能用 `Path::with_extension`：`20@10` 之类的后缀里没有点，但名称中可能有。
pub fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut os = base.as_os_str().to_owned();
    os.push(".");
    os.push(extension);
    PathBuf::from(os)
}

/// 是否为文本产物
pub fn is_text_artifact(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TEXT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(ArtifactKind::Repetitive(3).file_name("A"), "segment_A_3x.txt");
        assert_eq!(ArtifactKind::Single.file_name("A"), "segment_A_1x.txt");
        assert_eq!(ArtifactKind::DrillNew.file_name("A"), "icrt_A_new.txt");
        assert_eq!(ArtifactKind::DrillCumulative.file_name("A"), "icrt_A_all.txt");
    }

    #[test]
    fn test_audio_base_path() {
        let speed = SpeedProfile::new(25, 12).unwrap();
        let base = audio_base_path(Path::new("out/segment_A_2x.txt"), &speed);
        assert_eq!(base, PathBuf::from("out/segment_A_2x_25@12"));
        assert_eq!(with_extension(&base, "mp3"), PathBuf::from("out/segment_A_2x_25@12.mp3"));
    }

    #[test]
    fn test_with_extension_keeps_dotted_names() {
        let base = PathBuf::from("out/segment_v1.5_1x_20@20");
        assert_eq!(
            with_extension(&base, "wav"),
            PathBuf::from("out/segment_v1.5_1x_20@20.wav")
        );
    }

    #[test]
    fn test_is_text_artifact() {
        assert!(is_text_artifact(Path::new("a/icrt_A_new.txt")));
        assert!(!is_text_artifact(Path::new("a/icrt_A_new_20@10.mp3")));
        assert!(!is_text_artifact(Path::new("a/README")));
    }
}
