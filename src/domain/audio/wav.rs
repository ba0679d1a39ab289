use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Size of the canonical RIFF/WAVE header written by [`encode_wav`]
pub const WAV_HEADER_SIZE: usize = 44;

const PCM_FORMAT_TAG: u16 = 1;
const FMT_CHUNK_SIZE: u32 = 16;

/// Layout of a headerless linear PCM buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

impl PcmFormat {
    /// Gemini TTS returns signed 16-bit little-endian mono at 24 kHz
    pub const GEMINI: PcmFormat = PcmFormat {
        sample_rate: 24_000,
        bits_per_sample: 16,
        channels: 1,
    };

    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample.div_ceil(8)
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Playback duration of `byte_len` bytes of PCM in this format
    pub fn duration_of(&self, byte_len: usize) -> Duration {
        let byte_rate = self.byte_rate();
        if byte_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(byte_len as f64 / byte_rate as f64)
    }
}

/// Wrap raw PCM in a WAV container.
///
/// The header sizes are computed from `pcm.len()`, so the result is always
/// `WAV_HEADER_SIZE + pcm.len()` bytes long. An empty buffer produces a valid
/// zero-duration file. Buffers larger than `u32::MAX - 36` bytes cannot be
/// described by a RIFF header and are outside the supported input.
pub fn encode_wav(pcm: &[u8], format: PcmFormat) -> Vec<u8> {
    let data_len = pcm.len() as u32;
    let mut out = Vec::with_capacity(WAV_HEADER_SIZE + pcm.len());

    // RIFF chunk descriptor
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT_TAG.to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&format.byte_rate().to_le_bytes());
    out.extend_from_slice(&format.block_align().to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data sub-chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);

    debug_assert_eq!(out.len(), WAV_HEADER_SIZE + pcm.len());
    out
}
