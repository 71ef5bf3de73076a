//! Audio output collaborator: write the synthesized samples, then play them.
//!
//! Both halves are fire-and-forget from the orchestrator's point of view —
//! failures are reported for logging and never abort the loop.

use std::path::Path;

use crate::error::SpeechError;
use crate::{playback, wav};

/// Narrow interface over the audio sink and player, substitutable in tests.
pub trait AudioOutput {
    /// Persist samples at the given rate. Overwrites `path`.
    fn write(&self, path: &Path, sample_rate: u32, samples: &[f32]) -> Result<(), SpeechError>;

    /// Play a previously written file to completion.
    fn play(&self, path: &Path) -> Result<(), SpeechError>;
}

/// Default implementation: WAV file on disk, playback on the default device.
pub struct WavFileOutput;

impl AudioOutput for WavFileOutput {
    fn write(&self, path: &Path, sample_rate: u32, samples: &[f32]) -> Result<(), SpeechError> {
        wav::write_wav(path, sample_rate, samples)
    }

    fn play(&self, path: &Path) -> Result<(), SpeechError> {
        playback::play(path)
    }
}
