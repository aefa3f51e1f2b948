//! Audio Transcoder 实现

pub mod ffmpeg_transcoder;

pub use ffmpeg_transcoder::{
    probe_audio_file, verify_audio_file, verify_transcode, AudioProbe, FfmpegTranscoder,
    FfmpegTranscoderConfig,
};
