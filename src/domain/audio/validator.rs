use hound::{SampleFormat, WavReader};
use std::borrow::Cow;
use std::io::Cursor;

/// Clips shorter than this are rejected
pub const MIN_DURATION_SECS: f64 = 0.1;

/// Amplitude threshold (0.5% of full scale)
pub const SILENCE_THRESHOLD: f32 = 0.005;

/// Only every Nth sample of the first channel is inspected
pub const SILENCE_SAMPLE_STRIDE: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Validation failed: decode error: {0}")]
    Decode(String),
    #[error("Audio too short ({0:.2}s)")]
    TooShort(f64),
    #[error("Audio file contains only silence")]
    Silence,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    Invalid(ValidationFailure),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(failure) => Err(failure),
        }
    }
}

/// Check that a WAV clip is long enough and not silent.
///
/// Providers sometimes answer with a well-formed but empty clip (punctuation-only
/// input is a common trigger). The silence check samples the first channel with
/// a fixed stride, so it is a heuristic: a clip whose only audible samples fall
/// between strides is reported as silent.
pub fn validate_audio(bytes: &[u8]) -> Validation {
    let clip = match decode_first_channel(bytes) {
        Ok(clip) => clip,
        Err(e) => return Validation::Invalid(ValidationFailure::Decode(e)),
    };

    if clip.duration_secs < MIN_DURATION_SECS {
        return Validation::Invalid(ValidationFailure::TooShort(clip.duration_secs));
    }

    let has_sound = clip
        .samples
        .iter()
        .step_by(SILENCE_SAMPLE_STRIDE)
        .any(|s| s.abs() > SILENCE_THRESHOLD);

    if !has_sound {
        return Validation::Invalid(ValidationFailure::Silence);
    }

    Validation::Valid
}

struct DecodedClip {
    duration_secs: f64,
    samples: Vec<f32>,
}

fn decode_first_channel(bytes: &[u8]) -> Result<DecodedClip, String> {
    let bytes = fit_data_length(bytes);
    let mut reader = WavReader::new(Cursor::new(bytes.as_ref())).map_err(|e| e.to_string())?;
    let spec = reader.spec();

    if spec.sample_rate == 0 || spec.channels == 0 || spec.bits_per_sample == 0 {
        return Err("invalid format header".to_string());
    }

    let channels = spec.channels as usize;

    let interleaved = match spec.sample_format {
        SampleFormat::Float => read_available(reader.samples::<f32>(), channels)?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            read_available(
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale)),
                channels,
            )?
        }
    };

    // Whole frames only; duration follows what was actually decoded
    let frames = interleaved.len() / channels;
    let samples = interleaved
        .into_iter()
        .take(frames * channels)
        .step_by(channels)
        .collect();

    Ok(DecodedClip {
        duration_secs: frames as f64 / spec.sample_rate as f64,
        samples,
    })
}

/// Collect samples up to the first read error. A truncated tail is dropped
/// once at least one full frame has been read.
fn read_available<I>(samples: I, channels: usize) -> Result<Vec<f32>, String>
where
    I: Iterator<Item = hound::Result<f32>>,
{
    let mut decoded = Vec::new();
    for sample in samples {
        match sample {
            Ok(value) => decoded.push(value),
            Err(_) if decoded.len() >= channels => break,
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(decoded)
}

/// Rewrite the RIFF and `data` chunk sizes to match the bytes present.
///
/// Streaming encoders write placeholder sizes (often `0xFFFFFFFF`) and
/// truncated clips declare more data than they carry. The `data` size is
/// clamped to the remaining bytes and rounded down to whole frames.
/// Anything that does not look like a RIFF/WAVE file is returned unchanged.
fn fit_data_length(bytes: &[u8]) -> Cow<'_, [u8]> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Cow::Borrowed(bytes);
    }

    let mut block_align = 0usize;
    let mut pos = 12usize;

    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let declared = read_u32(bytes, pos + 4) as usize;
        let body = pos + 8;

        if id == b"fmt " && declared >= 16 && body + 16 <= bytes.len() {
            block_align = u16::from_le_bytes([bytes[body + 12], bytes[body + 13]]) as usize;
        }

        if id == b"data" {
            let available = bytes.len() - body;
            let mut fitted = declared.min(available);
            if block_align > 0 {
                fitted -= fitted % block_align;
            }
            let riff_size = (bytes.len() - 8).min(u32::MAX as usize);
            if fitted == declared && read_u32(bytes, 4) as usize == riff_size {
                return Cow::Borrowed(bytes);
            }

            let mut patched = bytes.to_vec();
            patched[4..8].copy_from_slice(&(riff_size as u32).to_le_bytes());
            patched[pos + 4..pos + 8].copy_from_slice(&(fitted as u32).to_le_bytes());
            return Cow::Owned(patched);
        }

        let next = body
            .checked_add(declared)
            .and_then(|end| end.checked_add(declared & 1));
        match next {
            Some(next) => pos = next,
            None => break,
        }
    }

    Cow::Borrowed(bytes)
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
