//! Synthesis backend capability interface and its HTTP implementation.
//!
//! The model server owns model loading and inference; this client only
//! ships text plus numeric controls and decodes the PCM that comes back.

use serde::Serialize;

use crate::directive::SynthesisParameters;
use crate::error::SpeechError;

/// Raw audio returned by the synthesis backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Narrow capability interface over the speech-synthesis backend.
pub trait Synthesizer {
    fn synthesize(
        &self,
        text: &str,
        params: &SynthesisParameters,
        speaker_id: u32,
    ) -> Result<Audio, SpeechError>;
}

#[derive(Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    speaker_id: u32,
    length_scale: f32,
    noise_scale: f32,
    noise_scale_w: f32,
    cleaned: bool,
}

/// Response header carrying the sample rate of the PCM body.
const SAMPLE_RATE_HEADER: &str = "x-sample-rate";

/// Blocking HTTP client for a synthesis model server. The response body is
/// raw little-endian f32 PCM.
///
/// No request timeout: inference time scales with text length, and a hung
/// backend blocking the loop is accepted behavior.
pub struct HttpSynthesizer {
    http: reqwest::blocking::Client,
    url: String,
}

impl HttpSynthesizer {
    pub fn new(endpoint: &str) -> Result<Self, SpeechError> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            url: format!("{}/synthesize", endpoint.trim_end_matches('/')),
        })
    }
}

impl Synthesizer for HttpSynthesizer {
    fn synthesize(
        &self,
        text: &str,
        params: &SynthesisParameters,
        speaker_id: u32,
    ) -> Result<Audio, SpeechError> {
        let body = SynthesisBody {
            text,
            speaker_id,
            length_scale: params.length_scale,
            noise_scale: params.noise_scale,
            noise_scale_w: params.noise_scale_w,
            cleaned: params.cleaned,
        };
        let resp = self.http.post(&self.url).json(&body).send()?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(SpeechError::Backend(format!("{status}: {text}")));
        }
        let sample_rate = resp
            .headers()
            .get(SAMPLE_RATE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| {
                SpeechError::Backend(format!("missing or invalid {SAMPLE_RATE_HEADER} header"))
            })?;
        let bytes = resp.bytes()?;
        let samples = bytes_to_f32(&bytes)?;
        Ok(Audio {
            samples,
            sample_rate,
        })
    }
}

/// Convert raw little-endian f32 PCM bytes to samples.
fn bytes_to_f32(bytes: &[u8]) -> Result<Vec<f32>, SpeechError> {
    if bytes.len() % 4 != 0 {
        return Err(SpeechError::Backend(format!(
            "PCM body length {} is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_f32_basic() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&(-0.5f32).to_le_bytes());
        let samples = bytes_to_f32(&bytes).unwrap();
        assert_eq!(samples, vec![1.0, -0.5]);
    }

    #[test]
    fn test_bytes_to_f32_empty() {
        assert!(bytes_to_f32(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bytes_to_f32_ragged_length_is_error() {
        let err = bytes_to_f32(&[0, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("multiple of 4"));
    }

    #[test]
    fn test_synthesis_body_serialization() {
        let params = SynthesisParameters::default();
        let body = SynthesisBody {
            text: "hello",
            speaker_id: 7,
            length_scale: params.length_scale,
            noise_scale: params.noise_scale,
            noise_scale_w: params.noise_scale_w,
            cleaned: params.cleaned,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "hello");
        assert_eq!(json["speaker_id"], 7);
        assert_eq!(json["cleaned"], false);
        assert!((json["noise_scale"].as_f64().unwrap() - 0.667).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_trailing_slash_stripped() {
        let synth = HttpSynthesizer::new("http://localhost:7860/").unwrap();
        assert_eq!(synth.url, "http://localhost:7860/synthesize");
    }
}
