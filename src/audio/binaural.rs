use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::modes::WaveMode;
use super::wav;
use crate::error::EchoError;
use crate::log_warn;

const ENABLE_LOGS: bool = true;

pub const SAMPLE_RATE: u32 = 44100;
pub const CARRIER_HZ: f64 = 200.0;
pub const CHANNELS: u16 = 2;

/// 7th-harmonic overlay added to the right ear at full meta-awareness.
pub const HARMONIC_OVERLAY_HZ: f64 = 54.81;
/// Extra gain on the overlay when the harmonic boost toggle is on.
pub const HARMONIC_BOOST_GAIN: f64 = 1.5;

const PCM_FULL_SCALE: f64 = 32767.0;

/// Longest tone, in frames, whose interleaved PCM16 still fits a u32 RIFF data chunk.
pub const MAX_FRAMES: usize = wav::MAX_PCM16_SAMPLES / CHANNELS as usize;

/// Everything the synthesizer reads. Nothing is taken from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResonanceParams {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub carrier_hz: f64,
    /// Not clamped here; the mode picker limits it to 0.5-50 Hz.
    pub beat_hz: f64,
    pub harmonic_boost: bool,
    /// Meta-awareness rating (1-10) scaling the overlay.
    pub meta_level: i32,
}

impl ResonanceParams {
    pub fn new(duration_secs: f64, beat_hz: f64, harmonic_boost: bool, meta_level: i32) -> Self {
        Self {
            duration_secs,
            sample_rate: SAMPLE_RATE,
            carrier_hz: CARRIER_HZ,
            beat_hz,
            harmonic_boost,
            meta_level,
        }
    }

    pub fn for_mode(mode: WaveMode, duration_secs: f64, harmonic_boost: bool, meta_level: i32) -> Self {
        Self::new(duration_secs, mode.beat_hz(), harmonic_boost, meta_level)
    }

    pub fn boost_hz(&self) -> f64 {
        let gain = if self.harmonic_boost {
            HARMONIC_BOOST_GAIN
        } else {
            1.0
        };
        HARMONIC_OVERLAY_HZ * (self.meta_level as f64 / 10.0) * gain
    }

    pub fn left_hz(&self) -> f64 {
        self.carrier_hz
    }

    pub fn right_hz(&self) -> f64 {
        self.carrier_hz + self.beat_hz + self.boost_hz()
    }

    /// Frames per channel: `floor(duration * sample_rate)`.
    ///
    /// `None` when the duration is not a positive finite number or the tone would
    /// not fit in a single WAVE data chunk.
    pub fn frame_count(&self) -> Option<usize> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return None;
        }
        let frames = (self.duration_secs * self.sample_rate as f64).floor();
        if !frames.is_finite() || frames > MAX_FRAMES as f64 {
            return None;
        }
        Some(frames as usize)
    }
}

/// Peak-normalized interleaved stereo samples (L, R, L, R, ...) before quantization.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl StereoBuffer {
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        CHANNELS
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / CHANNELS as usize
    }

    pub fn peak(&self) -> f64 {
        peak_abs(&self.samples)
    }

    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0.0)
    }

    /// `EchoError::SilentBuffer` when there is nothing audible to hand to the player.
    pub fn ensure_audible(&self) -> Result<&Self, EchoError> {
        if self.is_silent() {
            Err(EchoError::SilentBuffer)
        } else {
            Ok(self)
        }
    }

    /// Quantize to signed 16-bit, rounding to nearest.
    pub fn to_pcm16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * PCM_FULL_SCALE).round() as i16)
            .collect()
    }

    /// RIFF/WAVE container with the quantized samples, ready for playback.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, EchoError> {
        wav::encode_pcm16(&self.to_pcm16(), self.sample_rate, CHANNELS).ok_or_else(|| {
            EchoError::InvalidDuration(self.frames() as f64 / self.sample_rate as f64)
        })
    }
}

/// Render the binaural tone described by `params`.
///
/// Left ear plays the carrier, right ear plays carrier + beat + harmonic overlay.
/// Time runs over the half-open window `[0, duration)`.
pub fn synthesize(params: &ResonanceParams) -> Result<StereoBuffer, EchoError> {
    let frames = params
        .frame_count()
        .ok_or(EchoError::InvalidDuration(params.duration_secs))?;
    let capacity = frames
        .checked_mul(CHANNELS as usize)
        .ok_or(EchoError::InvalidDuration(params.duration_secs))?;

    let rate = params.sample_rate as f64;
    let left_hz = params.left_hz();
    let right_hz = params.right_hz();

    let mut samples = Vec::with_capacity(capacity);
    for i in 0..frames {
        let t = i as f64 / rate;
        samples.push((2.0 * PI * left_hz * t).sin());
        samples.push((2.0 * PI * right_hz * t).sin());
    }

    if normalize_peak(&mut samples).is_none() {
        log_warn!(
            "Synthesized {} frames at {:.1}s with no signal; returning silence",
            frames,
            params.duration_secs
        );
    }

    Ok(StereoBuffer {
        samples,
        sample_rate: params.sample_rate,
    })
}

/// Scale `samples` so the largest magnitude becomes 1.0. Returns the original peak,
/// or `None` (leaving the buffer zeroed) when there is no signal to scale.
pub fn normalize_peak(samples: &mut [f64]) -> Option<f64> {
    let peak = peak_abs(samples);
    if peak == 0.0 || !peak.is_finite() {
        samples.iter_mut().for_each(|s| *s = 0.0);
        return None;
    }
    samples.iter_mut().for_each(|s| *s /= peak);
    Some(peak)
}

fn peak_abs(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
}
