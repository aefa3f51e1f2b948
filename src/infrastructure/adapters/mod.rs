//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod morse;
pub mod transcoder;
pub mod wav;

pub use morse::*;
pub use transcoder::*;
pub use wav::*;
