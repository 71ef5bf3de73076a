//! Speech pipeline for murmur.
//!
//! Takes a generated reply from the chat side to audible output: inline
//! directive extraction, synthesis request assembly, the synthesis backend
//! interface, WAV encoding, and playback.

pub mod directive;
pub mod error;
pub mod output;
pub mod playback;
pub mod request;
pub mod synth;
pub mod wav;

pub use directive::SynthesisParameters;
pub use error::SpeechError;
pub use output::{AudioOutput, WavFileOutput};
pub use request::SynthesisRequest;
pub use synth::{Audio, HttpSynthesizer, Synthesizer};
