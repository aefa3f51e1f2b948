//! cwgen - 摩尔斯电码（CW）练习材料生成器
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Segment: 课程分段（单词、呼号、短语、新字符）
//! - Drill: 洗牌、单词流、字符组流
//! - SpeedProfile / ArtifactKind: 速度与产物命名
//!
//! 应用层 (application/):
//! - Ports: 端口定义（MorseEncoder, AudioContainer, AudioTranscoder）
//! - Commands: 文本生成 / 音频渲染命令处理器
//! - Pipeline: 两阶段编排
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 正弦音调合成器、WAV 写入器、FFmpeg 转码器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config_from_path, AppConfig};
