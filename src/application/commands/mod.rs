//! 应用层 - 命令（写操作）
//!
//! 文本生成与音频渲染两个批处理命令

mod audio_commands;
mod text_commands;

pub mod handlers;

pub use audio_commands::*;
pub use text_commands::*;
