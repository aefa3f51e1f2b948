//! Morse Adapters
//!
//! MorseEncoderPort 的正弦音调实现

mod code_table;
mod cw_tone_encoder;

pub use code_table::{code_for, encode_word};
pub use cw_tone_encoder::{CwToneConfig, CwToneEncoder, Timing};
