//! Synthesis request assembly.

use std::path::PathBuf;

use crate::directive::{self, SynthesisParameters};
use crate::error::SpeechError;

/// One synthesis-ready payload: cleaned text, numeric controls, target
/// speaker, and the output path. Built once per turn, consumed once by the
/// synthesis backend, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub params: SynthesisParameters,
    pub speaker_id: u32,
    pub output_path: PathBuf,
}

/// Build a request from a raw reply.
///
/// Runs directive extraction over the reply text; the residual text —
/// language markers included, those are ordinary bracket text here — is what
/// gets voiced. The only error is a malformed directive payload.
pub fn build(
    reply_text: &str,
    speaker_id: u32,
    output_path: impl Into<PathBuf>,
) -> Result<SynthesisRequest, SpeechError> {
    let (params, text) = directive::extract(reply_text)?;
    Ok(SynthesisRequest {
        text,
        params,
        speaker_id,
        output_path: output_path.into(),
    })
}

// =============================================================================
// Tests
// =============================================================================
