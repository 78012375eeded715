//! In-memory PCM toolkit used by the synthesizer and the mixer.
//!
//! Everything here works on [`PcmClip`]: interleaved `f32` samples in
//! `[-1.0, 1.0]` plus the sample rate and channel count needed to
//! interpret them.

pub mod decode;
pub mod effects;
pub mod encode;
pub mod resample;

use std::time::Duration;

use thiserror::Error;

/// Failure while loading, transforming or writing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("no decodable audio track")]
    NoAudioTrack,

    #[error("resample error: {0}")]
    Resample(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u16),

    #[error("cannot join {left} with {right}")]
    FormatMismatch { left: String, right: String },
}

pub type Result<T> = std::result::Result<T, AudioError>;

/// Interleaved PCM held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmClip {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl PcmClip {
    /// Wrap interleaved samples. A trailing partial frame is dropped.
    pub fn new(mut samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        let channels = channels.max(1);
        let whole = samples.len() - samples.len() % channels as usize;
        samples.truncate(whole);
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Digital silence of the given length.
    pub fn silence(duration: Duration, sample_rate: u32, channels: u16) -> Self {
        let channels = channels.max(1);
        let frames = frames_for(duration, sample_rate);
        Self::new(
            vec![0.0; frames * channels as usize],
            sample_rate,
            channels,
        )
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample count per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let nanos = self.frames() as u128 * 1_000_000_000 / self.sample_rate as u128;
        Duration::from_nanos(nanos as u64)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Frame count covering `duration` at this clip's rate.
    pub fn frames_in(&self, duration: Duration) -> usize {
        frames_for(duration, self.sample_rate)
    }

    /// Short human description used in error messages.
    pub fn describe(&self) -> String {
        format!("{} Hz / {} ch", self.sample_rate, self.channels)
    }

    pub(crate) fn same_layout(&self, other: &PcmClip) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }
}

/// Frames needed for `duration` at `sample_rate`, rounded to the nearest frame.
pub fn frames_for(duration: Duration, sample_rate: u32) -> usize {
    ((duration.as_nanos() * sample_rate as u128 + 500_000_000) / 1_000_000_000) as usize
}

/// Linear gain for a level in decibels.
pub fn db_to_amplitude(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_frames_are_dropped() {
        let clip = PcmClip::new(vec![0.1, 0.2, 0.3], 8_000, 2);
        assert_eq!(clip.frames(), 1);
        assert_eq!(clip.samples(), &[0.1, 0.2]);
    }

    #[test]
    fn silence_has_requested_length() {
        let clip = PcmClip::silence(Duration::from_millis(200), 48_000, 2);
        assert_eq!(clip.frames(), 9_600);
        assert_eq!(clip.samples().len(), 19_200);
        assert_eq!(clip.duration(), Duration::from_millis(200));
        assert_eq!(clip.peak(), 0.0);
    }

    #[test]
    fn decibel_conversion() {
        assert!((db_to_amplitude(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_amplitude(-6.0) - 0.501_187).abs() < 1e-4);
        assert!((db_to_amplitude(4.0) - 1.584_893).abs() < 1e-4);
    }
}
