//! Inline prosody directive parsing.
//!
//! Generated replies may embed bracketed control tags that parameterize the
//! synthesis request: `[LENGTH=1.2]` slows delivery, `[NOISE=0.5]` and
//! `[NOISEW=0.9]` adjust stochastic variation, and the bare `[CLEANED]` flag
//! marks the text as already phonemized. Extraction strips every recognized
//! tag and leaves all other bracket text (language markers, for example)
//! untouched for later stages.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SpeechError;

/// Numeric controls for one synthesis request.
///
/// Constructed fresh per reply from the defaults below, overridden by any
/// directives present in that reply's text. Never persisted across turns.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParameters {
    pub length_scale: f32,
    pub noise_scale: f32,
    pub noise_scale_w: f32,
    pub cleaned: bool,
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            cleaned: false,
        }
    }
}

type Setter = fn(&mut SynthesisParameters, f32);

/// Value directives in fixed extraction order. Each is read from its first
/// occurrence and only that occurrence is removed, so the order is
/// deterministic regardless of which keys are present.
static VALUE_DIRECTIVES: LazyLock<Vec<(&'static str, Regex, Setter)>> = LazyLock::new(|| {
    let entry = |key: &'static str, set: Setter| {
        let re = Regex::new(&format!(r"\[{key}=([^\]]+)\]")).expect("invalid directive regex");
        (key, re, set)
    };
    vec![
        entry("LENGTH", |p, v| p.length_scale = v),
        entry("NOISE", |p, v| p.noise_scale = v),
        entry("NOISEW", |p, v| p.noise_scale_w = v),
    ]
});

/// Flag directive token. Presence sets the flag once; all literal
/// occurrences are removed.
const CLEANED_TOKEN: &str = "[CLEANED]";

/// Extract directives from `text`, returning the parameter set and the
/// residual text.
///
/// Value directives are processed before the flag directive. A value payload
/// that does not parse as a number is a hard error naming the offending key;
/// the caller aborts the turn's synthesis rather than degrading silently.
/// Bracket text matching no recognized key or shape passes through verbatim.
pub fn extract(text: &str) -> Result<(SynthesisParameters, String), SpeechError> {
    let mut params = SynthesisParameters::default();
    let mut residual = text.to_string();

    for (key, re, set) in VALUE_DIRECTIVES.iter() {
        if let Some(caps) = re.captures(&residual) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let value: f32 = raw.trim().parse().map_err(|_| SpeechError::Directive {
                key: *key,
                value: raw.to_string(),
            })?;
            set(&mut params, value);
            // Regex::replace removes only the leftmost occurrence.
            residual = re.replace(&residual, "").into_owned();
        }
    }

    if residual.contains(CLEANED_TOKEN) {
        params.cleaned = true;
        residual = residual.replace(CLEANED_TOKEN, "");
    }

    Ok((params, residual))
}

// =============================================================================
// Tests
// =============================================================================
