//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod audio_handlers;
mod text_handlers;

pub use audio_handlers::*;
pub use text_handlers::*;
