//! Symphonia loader → interleaved f32 PCM

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default;
use tracing::warn;

use super::{AudioError, PcmClip, Result};

/// Decode an audio file, probing the container from its extension and content.
pub fn load(path: &Path) -> Result<PcmClip> {
    let file = File::open(path)?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    decode_source(Box::new(file), extension)
}

/// Decode an in-memory encoded buffer such as a provider response.
pub fn decode_bytes(data: Vec<u8>, extension: Option<&str>) -> Result<PcmClip> {
    decode_source(Box::new(Cursor::new(data)), extension)
}

fn decode_source(source: Box<dyn MediaSource>, extension: Option<&str>) -> Result<PcmClip> {
    let mss = MediaSourceStream::new(source, Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions {
                enable_gapless: true,
                ..Default::default()
            },
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::Decode(e.to_string()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(AudioError::NoAudioTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Decode(e.to_string()))?;

    let mut sample_rate = codec_params.sample_rate.unwrap_or(0);
    let mut channels = codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(1);
    let mut samples = Vec::<f32>::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            // A corrupt frame costs a few milliseconds, not the clip.
            Err(SymphoniaError::DecodeError(msg)) => {
                warn!(error = msg, "skipping undecodable packet");
            }
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        }
    }

    if sample_rate == 0 {
        return Err(AudioError::Decode("unknown sample rate".to_string()));
    }

    Ok(PcmClip::new(samples, sample_rate, channels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::encode;

    #[test]
    fn wav_bytes_decode_to_the_same_layout() {
        let tone: Vec<f32> = (0..4_800)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();
        let clip = PcmClip::new(tone, 24_000, 1);
        let bytes = encode::wav_bytes(&clip).unwrap();

        let decoded = decode_bytes(bytes, Some("wav")).unwrap();
        assert_eq!(decoded.sample_rate(), 24_000);
        assert_eq!(decoded.channels(), 1);
        assert_eq!(decoded.frames(), 4_800);
        assert!((decoded.peak() - clip.peak()).abs() < 1e-3);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let result = decode_bytes(b"definitely not audio".to_vec(), None);
        assert!(matches!(
            result,
            Err(AudioError::Decode(_)) | Err(AudioError::NoAudioTrack)
        ));
    }
}
