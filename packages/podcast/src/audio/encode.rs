//! MP3 (LAME) and WAV (hound) writers.

use std::io::Cursor;
use std::path::Path;

use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};
use podcast_voice_domain::ExportFormat;

use super::{AudioError, PcmClip, Result};

/// LAME quality preset, from fastest to most careful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeQuality {
    Standard,
    Best,
}

impl From<EncodeQuality> for Quality {
    fn from(value: EncodeQuality) -> Self {
        match value {
            EncodeQuality::Standard => Quality::Good,
            EncodeQuality::Best => Quality::Best,
        }
    }
}

/// Write `clip` to `path` in the requested container.
pub fn export(
    clip: &PcmClip,
    path: &Path,
    format: ExportFormat,
    bitrate_kbps: u32,
    quality: EncodeQuality,
) -> Result<()> {
    let bytes = match format {
        ExportFormat::Mp3 => mp3_bytes(clip, bitrate_kbps, quality)?,
        ExportFormat::Wav => wav_bytes(clip)?,
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

/// 16-bit PCM WAV image of `clip`.
pub fn wav_bytes(clip: &PcmClip) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: clip.channels(),
        sample_rate: clip.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec)?;
        for sample in clip.samples() {
            writer.write_sample(to_i16(*sample))?;
        }
        writer.finalize()?;
    }
    Ok(buffer)
}

/// Wrap headerless little-endian 16-bit mono PCM in a WAV container.
pub fn wrap_raw_pcm(raw: &[u8], sample_rate: u32) -> Result<Vec<u8>> {
    let samples = raw
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32_768.0)
        .collect();
    wav_bytes(&PcmClip::new(samples, sample_rate, 1))
}

/// Constant-bitrate MP3 image of `clip`. Mono and stereo only.
pub fn mp3_bytes(clip: &PcmClip, bitrate_kbps: u32, quality: EncodeQuality) -> Result<Vec<u8>> {
    let channels = clip.channels();
    if !(1..=2).contains(&channels) {
        return Err(AudioError::UnsupportedChannels(channels));
    }

    let mut builder =
        Builder::new().ok_or_else(|| AudioError::Encode("LAME allocation failed".to_string()))?;
    builder.set_num_channels(channels as u8).map_err(lame_error)?;
    builder
        .set_sample_rate(clip.sample_rate())
        .map_err(lame_error)?;
    builder
        .set_brate(nearest_bitrate(bitrate_kbps))
        .map_err(lame_error)?;
    builder.set_quality(quality.into()).map_err(lame_error)?;
    let mut encoder = builder.build().map_err(lame_error)?;

    let pcm: Vec<i16> = clip.samples().iter().copied().map(to_i16).collect();

    let mut out = Vec::new();
    out.reserve(mp3lame_encoder::max_required_buffer_size(pcm.len()));
    let written = if channels == 1 {
        encoder.encode(MonoPcm(&pcm), out.spare_capacity_mut())
    } else {
        encoder.encode(InterleavedPcm(&pcm), out.spare_capacity_mut())
    }
    .map_err(lame_error)?;
    // SAFETY: LAME initialised exactly `written` bytes of the spare capacity.
    unsafe {
        out.set_len(out.len().wrapping_add(written));
    }

    out.reserve(7_200);
    let flushed = encoder
        .flush::<FlushNoGap>(out.spare_capacity_mut())
        .map_err(lame_error)?;
    // SAFETY: as above, for the flushed tail.
    unsafe {
        out.set_len(out.len().wrapping_add(flushed));
    }

    Ok(out)
}

/// Smallest LAME bitrate at or above `kbps`, capped at 320.
fn nearest_bitrate(kbps: u32) -> Bitrate {
    match kbps {
        0..=8 => Bitrate::Kbps8,
        9..=16 => Bitrate::Kbps16,
        17..=24 => Bitrate::Kbps24,
        25..=32 => Bitrate::Kbps32,
        33..=40 => Bitrate::Kbps40,
        41..=48 => Bitrate::Kbps48,
        49..=64 => Bitrate::Kbps64,
        65..=80 => Bitrate::Kbps80,
        81..=96 => Bitrate::Kbps96,
        97..=112 => Bitrate::Kbps112,
        113..=128 => Bitrate::Kbps128,
        129..=160 => Bitrate::Kbps160,
        161..=192 => Bitrate::Kbps192,
        193..=224 => Bitrate::Kbps224,
        225..=256 => Bitrate::Kbps256,
        _ => Bitrate::Kbps320,
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

fn lame_error(e: impl std::fmt::Debug) -> AudioError {
    AudioError::Encode(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode;
    use std::time::Duration;

    fn tone(seconds: f32, sample_rate: u32, channels: u16) -> PcmClip {
        let frames = (seconds * sample_rate as f32) as usize;
        let samples = (0..frames)
            .flat_map(|i| {
                let v = (i as f32 * 440.0 * std::f32::consts::TAU / sample_rate as f32).sin() * 0.4;
                std::iter::repeat_n(v, channels as usize)
            })
            .collect();
        PcmClip::new(samples, sample_rate, channels)
    }

    #[test]
    fn mp3_round_trip_keeps_rate_and_roughly_the_length() {
        let clip = tone(1.0, 48_000, 2);
        let bytes = mp3_bytes(&clip, 320, EncodeQuality::Best).unwrap();
        assert!(!bytes.is_empty());

        let decoded = decode::decode_bytes(bytes, Some("mp3")).unwrap();
        assert_eq!(decoded.sample_rate(), 48_000);
        assert_eq!(decoded.channels(), 2);
        let drift = decoded.duration().abs_diff(Duration::from_secs(1));
        assert!(drift < Duration::from_millis(100), "drift {drift:?}");
    }

    #[test]
    fn raw_pcm_is_wrapped_as_wav() {
        let raw: Vec<u8> = [0i16, 16_384, -16_384, 0]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let wav = wrap_raw_pcm(&raw, 16_000).unwrap();
        assert_eq!(&wav[..4], b"RIFF");

        let clip = decode::decode_bytes(wav, Some("wav")).unwrap();
        assert_eq!(clip.sample_rate(), 16_000);
        assert_eq!(clip.frames(), 4);
        assert!((clip.samples()[1] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn surround_is_rejected_for_mp3() {
        let clip = PcmClip::new(vec![0.0; 60], 48_000, 6);
        assert!(matches!(
            mp3_bytes(&clip, 128, EncodeQuality::Standard),
            Err(AudioError::UnsupportedChannels(6))
        ));
    }

    #[test]
    fn bitrates_round_up_to_lame_steps() {
        assert!(matches!(nearest_bitrate(256), Bitrate::Kbps256));
        assert!(matches!(nearest_bitrate(250), Bitrate::Kbps256));
        assert!(matches!(nearest_bitrate(1_000), Bitrate::Kbps320));
    }
}
