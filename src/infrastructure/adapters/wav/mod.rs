//! WAV Adapter - AudioContainerPort 实现

mod wav_container;

pub use wav_container::WavContainer;
