//! Domain Layer - 领域层
//!
//! 练习素材的核心规则:
//! - Segment: 练习单元与素材池
//! - Drill: 单词流 / 字符组流生成
//! - Speed / Artifact: 速度配置与产物命名

pub mod artifact;
pub mod drill;
pub mod errors;
pub mod segment;
pub mod speed;

pub use artifact::{audio_base_path, is_text_artifact, with_extension, ArtifactKind};
pub use drill::{build_group_stream, build_word_stream, shuffle, DEFAULT_GROUP_SIZE};
pub use errors::DrillError;
pub use segment::{cumulative_characters, Segment, BOUNDARY};
pub use speed::SpeedProfile;
