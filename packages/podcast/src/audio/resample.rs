//! Sample-rate and channel-layout conversion.
//!
//! Every clip entering the mixer passes through [`conform`], so joins and
//! crossfades only ever see one layout.

use rubato::{FftFixedIn, Resampler};

use super::{AudioError, PcmClip, Result};

const CHUNK: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Bring `clip` to `sample_rate` Hz with `channels` interleaved channels.
pub fn conform(clip: PcmClip, sample_rate: u32, channels: u16) -> Result<PcmClip> {
    let clip = remix(clip, channels)?;
    resample(clip, sample_rate)
}

/// Change the channel count. Sources are averaged to mono first, then
/// fanned out, so mono→stereo duplicates and stereo→mono averages.
pub fn remix(clip: PcmClip, channels: u16) -> Result<PcmClip> {
    if channels == 0 {
        return Err(AudioError::UnsupportedChannels(0));
    }
    if clip.channels() == channels {
        return Ok(clip);
    }

    let src = clip.channels() as usize;
    let rate = clip.sample_rate();
    let mono = clip
        .samples()
        .chunks_exact(src)
        .map(|frame| frame.iter().sum::<f32>() / src as f32);

    let samples = if channels == 1 {
        mono.collect()
    } else {
        mono.flat_map(|v| std::iter::repeat_n(v, channels as usize))
            .collect()
    };
    Ok(PcmClip::new(samples, rate, channels))
}

/// Resample every channel to `sample_rate`, keeping the clip's duration.
pub fn resample(clip: PcmClip, sample_rate: u32) -> Result<PcmClip> {
    let sr_in = clip.sample_rate();
    let channels = clip.channels();
    if sr_in == sample_rate {
        return Ok(clip);
    }
    if clip.is_empty() {
        return Ok(PcmClip::new(Vec::new(), sample_rate, channels));
    }

    let ch = channels as usize;
    let frames = clip.frames();
    let planar: Vec<Vec<f32>> = (0..ch)
        .map(|c| clip.samples().iter().skip(c).step_by(ch).copied().collect())
        .collect();

    let mut resampler =
        FftFixedIn::<f32>::new(sr_in as usize, sample_rate as usize, CHUNK, SUB_CHUNKS, ch)
            .map_err(|e| AudioError::Resample(e.to_string()))?;

    let expected = (frames as f64 * sample_rate as f64 / sr_in as f64).round() as usize;
    // The filter emits `delay` frames of lead-in before the first input frame.
    let delay = resampler.output_delay();
    let wanted = delay + expected;
    let mut out: Vec<Vec<f32>> = vec![Vec::with_capacity(wanted + CHUNK); ch];

    // Keep feeding (zero padding past the end) until the filter has
    // released the lead-in plus `expected` frames.
    let mut pos = 0;
    while out[0].len() < wanted {
        let end = (pos + CHUNK).min(frames);
        let block: Vec<Vec<f32>> = planar
            .iter()
            .map(|channel| {
                let mut chunk = vec![0.0; CHUNK];
                if pos < end {
                    chunk[..end - pos].copy_from_slice(&channel[pos..end]);
                }
                chunk
            })
            .collect();

        let processed = resampler
            .process(&block, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        let produced = processed.first().map_or(0, Vec::len);
        for (dst, src) in out.iter_mut().zip(processed) {
            dst.extend(src);
        }
        pos = end;

        if produced == 0 && pos >= frames {
            break;
        }
    }

    for channel in &mut out {
        channel.drain(..delay.min(channel.len()));
        channel.resize(expected, 0.0);
    }

    let mut samples = Vec::with_capacity(expected * ch);
    for i in 0..expected {
        for channel in &out {
            samples.push(channel[i]);
        }
    }
    Ok(PcmClip::new(samples, sample_rate, channels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn mono_fans_out_to_stereo() {
        let clip = PcmClip::new(vec![0.1, 0.2, 0.3], 48_000, 1);
        let stereo = remix(clip, 2).unwrap();
        assert_eq!(stereo.channels(), 2);
        assert_eq!(stereo.samples(), &[0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
    }

    #[test]
    fn stereo_averages_to_mono() {
        let clip = PcmClip::new(vec![0.2, 0.4, -1.0, 1.0], 48_000, 2);
        let mono = remix(clip, 1).unwrap();
        assert_eq!(mono.channels(), 1);
        assert!((mono.samples()[0] - 0.3).abs() < 1e-6);
        assert!(mono.samples()[1].abs() < 1e-6);
    }

    #[test]
    fn resampling_keeps_duration() {
        let clip = PcmClip::silence(Duration::from_millis(750), 44_100, 2);
        let out = resample(clip, 48_000).unwrap();
        assert_eq!(out.sample_rate(), 48_000);
        assert_eq!(out.channels(), 2);
        assert_eq!(out.frames(), 36_000);
    }

    #[test]
    fn conform_handles_rate_and_layout_together() {
        let samples = (0..22_050).map(|i| (i as f32 * 0.01).sin() * 0.3).collect();
        let clip = PcmClip::new(samples, 22_050, 1);
        let out = conform(clip, 48_000, 2).unwrap();
        assert_eq!(out.sample_rate(), 48_000);
        assert_eq!(out.channels(), 2);
        assert_eq!(out.frames(), 48_000);
        assert!(out.peak() > 0.1);
    }

    fn click_at_midpoint(sample_rate: u32) -> PcmClip {
        let frames = sample_rate as usize;
        let mut samples = vec![0.0; frames];
        samples[frames / 2] = 0.9;
        PcmClip::new(samples, sample_rate, 1)
    }

    fn loudest_frame(clip: &PcmClip) -> usize {
        clip.samples()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn resampling_does_not_shift_audio() {
        for rate in [22_050, 24_000, 44_100] {
            let out = resample(click_at_midpoint(rate), 48_000).unwrap();
            assert_eq!(out.frames(), 48_000);
            let found = loudest_frame(&out);
            assert!(found.abs_diff(24_000) <= 2, "{rate} Hz click landed at {found}");
        }
    }

    #[test]
    fn resampling_keeps_the_tail() {
        let frames = 24_000;
        let mut samples = vec![0.0; frames];
        for s in &mut samples[frames - 480..] {
            *s = 0.5;
        }
        let out = resample(PcmClip::new(samples, 24_000, 1), 48_000).unwrap();
        // Middle of the final 10 ms block, away from the filter's edge ringing.
        let tail = out.samples()[48_000 - 480];
        assert!((tail - 0.5).abs() < 0.05, "tail level {tail}");
    }

    #[test]
    fn zero_channels_is_rejected() {
        let clip = PcmClip::new(vec![0.0; 4], 48_000, 1);
        assert!(matches!(
            remix(clip, 0),
            Err(AudioError::UnsupportedChannels(0))
        ));
    }
}
