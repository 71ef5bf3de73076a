//! Audio playback through the default output device.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::SpeechError;

/// Play an audio file to completion on the default output device.
///
/// Blocking; the turn loop waits for playback to finish before prompting
/// again. Errors are returned for the caller to log — playback is never
/// load-bearing.
pub fn play(path: &Path) -> Result<(), SpeechError> {
    let (_stream, handle) = OutputStream::try_default()
        .map_err(|e| SpeechError::Playback(format!("no output device: {e}")))?;
    let sink = Sink::try_new(&handle).map_err(|e| SpeechError::Playback(e.to_string()))?;
    let file = File::open(path)
        .map_err(|e| SpeechError::Playback(format!("{}: {e}", path.display())))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| SpeechError::Playback(e.to_string()))?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
