//! Level changes and joins.

use std::time::Duration;

use super::{AudioError, PcmClip, Result, db_to_amplitude};

/// Level a fade starts from or ends at, in dB. Effectively silent.
const FADE_FLOOR_DB: f32 = -120.0;

/// Scale so the loudest sample sits `headroom_db` below full scale.
///
/// Returns `false` and leaves the clip untouched when it is silent.
pub fn peak_normalize(clip: &mut PcmClip, headroom_db: f32) -> bool {
    let peak = clip.peak();
    if peak <= f32::EPSILON {
        return false;
    }
    let scale = db_to_amplitude(-headroom_db.abs()) / peak;
    for sample in clip.samples_mut() {
        *sample *= scale;
    }
    true
}

/// Add `gain_db` and hard-clip to full scale.
pub fn apply_gain(clip: &mut PcmClip, gain_db: f32) {
    if gain_db == 0.0 {
        return;
    }
    let gain = db_to_amplitude(gain_db);
    for sample in clip.samples_mut() {
        *sample = (*sample * gain).clamp(-1.0, 1.0);
    }
}

/// `clip` preceded by `duration` of silence.
pub fn with_leading_silence(clip: PcmClip, duration: Duration) -> PcmClip {
    let rate = clip.sample_rate();
    let channels = clip.channels();
    let mut samples = PcmClip::silence(duration, rate, channels).into_samples();
    samples.extend_from_slice(clip.samples());
    PcmClip::new(samples, rate, channels)
}

/// Append `next` to `base`, overlapping the last frames of `base` with the
/// first frames of `next` under linear gain ramps.
///
/// The overlap is clamped to the shorter of the two clips, so the result is
/// always `base.frames() + next.frames() - overlap` frames long. Returns the
/// overlap actually used, in frames.
pub fn append_crossfade(base: &mut PcmClip, next: &PcmClip, crossfade: Duration) -> Result<usize> {
    if !base.same_layout(next) {
        return Err(AudioError::FormatMismatch {
            left: base.describe(),
            right: next.describe(),
        });
    }

    let ch = base.channels() as usize;
    let overlap = base
        .frames_in(crossfade)
        .min(base.frames())
        .min(next.frames());

    let start = (base.frames() - overlap) * ch;
    let floor = db_to_amplitude(FADE_FLOOR_DB);
    let (head, tail) = next.samples().split_at(overlap * ch);

    for (frame, (out, incoming)) in base.samples_mut()[start..]
        .chunks_exact_mut(ch)
        .zip(head.chunks_exact(ch))
        .enumerate()
    {
        let t = frame as f32 / overlap as f32;
        let fade_out = 1.0 - (1.0 - floor) * t;
        let fade_in = floor + (1.0 - floor) * t;
        for (o, i) in out.iter_mut().zip(incoming) {
            *o = *o * fade_out + *i * fade_in;
        }
    }

    base.samples.extend_from_slice(tail);

    Ok(overlap)
}
