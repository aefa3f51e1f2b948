//! CW Tone Encoder - 正弦音调摩尔斯合成器
//!
//! 时序采用 PARIS 标准：
//! - dit = 1.2 / wpm 秒，dah = 3 dit，码元间隔 = 1 dit
//! - 字符 / 单词间隔按 ARRL Farnsworth 公式计算，速度相同时退化为 3 / 7 dit

use std::f32::consts::TAU;

use crate::application::ports::{EncodeError, MorseEncoderPort, SampleBuffer};
use crate::config::AudioConfig;
use crate::domain::SpeedProfile;

use super::code_table::encode_word;

/// 每个码元两端的淡入淡出时长（毫秒），消除键击声
const RAMP_MS: f32 = 5.0;

/// 合成器配置
#[derive(Debug, Clone)]
pub struct CwToneConfig {
    pub sample_rate: u32,
    pub tone_frequency: f32,
    pub volume: f32,
}

impl Default for CwToneConfig {
    fn default() -> Self {
        Self {
            sample_rate: 8000,
            tone_frequency: 550.0,
            volume: 0.8,
        }
    }
}

impl From<&AudioConfig> for CwToneConfig {
    fn from(audio: &AudioConfig) -> Self {
        Self {
            sample_rate: audio.sample_rate,
            tone_frequency: audio.tone_frequency,
            volume: audio.volume,
        }
    }
}

/// 各类间隔时长（秒）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub dit: f32,
    pub char_gap: f32,
    pub word_gap: f32,
}

impl Timing {
    pub fn for_speed(speed: SpeedProfile) -> Self {
        let wpm = speed.wpm() as f32;
        let fwpm = speed.farnsworth() as f32;
        // ARRL: ta = (60c - 37.2s) / (sc)，总延时按 3:7 分配到字符和单词间隔
        let total_delay = (60.0 * wpm - 37.2 * fwpm) / (wpm * fwpm);
        Self {
            dit: 1.2 / wpm,
            char_gap: 3.0 * total_delay / 19.0,
            word_gap: 7.0 * total_delay / 19.0,
        }
    }
}

/// 正弦音调摩尔斯编码器
pub struct CwToneEncoder {
    config: CwToneConfig,
}

impl CwToneEncoder {
    pub fn new(config: CwToneConfig) -> Self {
        Self { config }
    }

    fn samples_for(&self, seconds: f32) -> usize {
        (seconds * self.config.sample_rate as f32).round() as usize
    }

    fn push_silence(&self, samples: &mut Vec<f32>, seconds: f32) {
        let n = self.samples_for(seconds);
        samples.resize(samples.len() + n, 0.0);
    }

    fn push_tone(&self, samples: &mut Vec<f32>, seconds: f32) {
        let n = self.samples_for(seconds);
        let rate = self.config.sample_rate as f32;
        let step = TAU * self.config.tone_frequency / rate;
        let ramp = (self.samples_for(RAMP_MS / 1000.0)).min(n / 2).max(1) as f32;

        samples.extend((0..n).map(|i| {
            let edge = i.min(n - 1 - i) as f32;
            let envelope = (edge / ramp).min(1.0);
            (step * i as f32).sin() * self.config.volume * envelope
        }));
    }
}

impl MorseEncoderPort for CwToneEncoder {
    fn encode(&self, text: &str, speed: SpeedProfile) -> Result<SampleBuffer, EncodeError> {
        let rate = self.config.sample_rate;
        if rate == 0 {
            return Err(EncodeError::InvalidParameter("sample rate cannot be 0".to_string()));
        }
        if !(self.config.tone_frequency > 0.0 && self.config.tone_frequency < rate as f32 / 2.0) {
            return Err(EncodeError::InvalidParameter(format!(
                "tone frequency {} Hz out of range for {} Hz sample rate",
                self.config.tone_frequency, rate
            )));
        }

        let timing = Timing::for_speed(speed);
        let mut samples = Vec::new();
        let mut first_word = true;

        for word in text.split_whitespace() {
            let (codes, skipped) = encode_word(word);
            if !skipped.is_empty() {
                tracing::debug!(word = %word, skipped = ?skipped, "Skipping characters without Morse code");
            }
            if codes.is_empty() {
                continue;
            }

            if !first_word {
                self.push_silence(&mut samples, timing.word_gap);
            }
            first_word = false;

            for (ci, code) in codes.iter().enumerate() {
                if ci > 0 {
                    self.push_silence(&mut samples, timing.char_gap);
                }
                for (ei, element) in code.chars().enumerate() {
                    if ei > 0 {
                        self.push_silence(&mut samples, timing.dit);
                    }
                    let length = if element == '-' { 3.0 * timing.dit } else { timing.dit };
                    self.push_tone(&mut samples, length);
                }
            }
        }

        Ok(SampleBuffer::new(samples, rate))
    }
}
