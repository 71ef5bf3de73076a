//! WAV encoding for synthesized audio.
//!
//! Pure encoding plus a thin write-to-disk helper. The synthesis backend
//! hands back f32 samples; the file on disk is 16-bit mono PCM.

use std::path::Path;

use crate::error::SpeechError;

/// Encode f32 samples as a minimal WAV file (16-bit mono PCM).
///
/// Samples are clamped to [-1.0, 1.0] before scaling.
pub fn encode(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let file_len = 36 + data_len;
    let mut buf = Vec::with_capacity(44 + data_len as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_len.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&1u16.to_le_bytes()); // mono
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    buf.extend_from_slice(&2u16.to_le_bytes()); // block align
    buf.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_len.to_le_bytes());
    for &sample in samples {
        let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        buf.extend_from_slice(&scaled.to_le_bytes());
    }

    buf
}

/// Encode and write to `path`, overwriting any previous file there.
pub fn write_wav(path: &Path, sample_rate: u32, samples: &[f32]) -> Result<(), SpeechError> {
    std::fs::write(path, encode(samples, sample_rate))
        .map_err(|e| SpeechError::Sink(format!("{}: {e}", path.display())))
}

// =============================================================================
// Tests
// =============================================================================
