//! PCM conversion and WAV container encoding
//!
//! Cues are quantized to 16-bit PCM and wrapped in a plain RIFF/WAVE
//! container (mono, 16-bit, 44-byte header). Encoding happens in memory;
//! persisting the bytes is the caller's job.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Result, SynthError};

/// Size of the RIFF/WAVE header preceding the PCM frames
pub const WAV_HEADER_LEN: usize = 44;

/// Full-scale value used for quantization (-32768 is never produced)
const PCM_SCALE: f64 = i16::MAX as f64;

/// Convert f32 samples to 16-bit PCM
///
/// Samples are clamped to -1.0..=1.0, scaled by 32767 and truncated toward
/// zero, so every frame lies in -32767..=32767.
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (f64::from(s).clamp(-1.0, 1.0) * PCM_SCALE) as i16)
        .collect()
}

/// Convert 16-bit PCM back to f32 (-1.0 to 1.0)
pub fn from_pcm_i16(frames: &[i16]) -> Vec<f32> {
    frames
        .iter()
        .map(|&s| (f64::from(s) / PCM_SCALE) as f32)
        .collect()
}

/// Multiply `samples` by `envelope` and a constant `gain`
///
/// Both buffers must have the same length; a mismatch leaves `samples`
/// untouched and returns [`SynthError::LengthMismatch`].
pub fn apply_gain(samples: &mut [f32], envelope: &[f32], gain: f32) -> Result<()> {
    if samples.len() != envelope.len() {
        return Err(SynthError::LengthMismatch {
            samples: samples.len(),
            envelope: envelope.len(),
        });
    }

    for (sample, &env) in samples.iter_mut().zip(envelope) {
        *sample = gain * *sample * env;
    }
    Ok(())
}

/// Sum equal-length layers, each scaled by its gain
///
/// The result is not normalized.
pub fn mix(layers: &[(&[f32], f32)]) -> Vec<f32> {
    let len = layers.iter().map(|(s, _)| s.len()).max().unwrap_or(0);
    let mut out = vec![0.0f32; len];

    for (samples, gain) in layers {
        for (acc, &sample) in out.iter_mut().zip(samples.iter()) {
            *acc += gain * sample;
        }
    }

    out
}

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Encode samples as a mono 16-bit WAV file held in memory
///
/// The result is [`WAV_HEADER_LEN`] header bytes followed by two bytes per
/// sample, little-endian.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + samples.len() * 2));

    let mut writer = WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
    for frame in to_pcm_i16(samples) {
        writer.write_sample(frame)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// Header fields and PCM frames read back from an encoded WAV
#[derive(Debug, Clone)]
pub struct DecodedWav {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub frames: Vec<i16>,
}

impl DecodedWav {
    /// Frames rescaled to f32
    pub fn samples(&self) -> Vec<f32> {
        from_pcm_i16(&self.frames)
    }
}

/// Decode a 16-bit integer WAV produced by [`encode_wav`]
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedWav> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let frames = reader.samples::<i16>().collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(DecodedWav {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        frames,
    })
}
