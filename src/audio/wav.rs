//! Minimal canonical RIFF/WAVE writer for 16-bit integer PCM.

const HEADER_LEN: usize = 44;
/// RIFF chunk size is `36 + data bytes` and must fit in a u32.
pub const MAX_PCM16_SAMPLES: usize = ((u32::MAX - 36) / 2) as usize;
const BITS_PER_SAMPLE: u16 = 16;
const FORMAT_PCM: u16 = 1;

/// Wrap interleaved samples in a 44-byte WAVE header. All fields little-endian.
///
/// `None` when more than [`MAX_PCM16_SAMPLES`] samples are given.
pub fn encode_pcm16(samples: &[i16], sample_rate: u32, channels: u16) -> Option<Vec<u8>> {
    let block_align = channels.checked_mul(BITS_PER_SAMPLE / 8)?;
    let byte_rate = sample_rate.checked_mul(block_align as u32)?;
    if samples.len() > MAX_PCM16_SAMPLES {
        return None;
    }
    let data_len = u32::try_from(samples.len() * 2).ok()?;

    let mut out = Vec::with_capacity(HEADER_LEN + samples.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    Some(out)
}
