//! Buffer-level audio synthesis
//!
//! Every generator materializes a whole `Vec<f32>` buffer in one call.
//! Nothing here streams, and nothing touches the file system.
//!
//! # Example
//! ```
//! use sfx_synth::audio::*;
//!
//! let n = samples_for(0.1, SAMPLE_RATE)?;
//! let mut tone = sine(440.0, n, SAMPLE_RATE)?;
//! let env = Envelope::new(0.005, 0.03, 0.0, 0.05).generate(n, SAMPLE_RATE)?;
//! apply_gain(&mut tone, &env, 0.5)?;
//!
//! let wav = encode_wav(&tone, SAMPLE_RATE)?;
//! assert_eq!(&wav[..4], b"RIFF");
//! # Ok::<(), sfx_synth::SynthError>(())
//! ```

mod cues;
mod envelope;
mod export;
mod filters;
mod oscillators;

use crate::error::{Result, SynthError};

/// Sample rate every cue is rendered at (44.1kHz)
pub const SAMPLE_RATE: u32 = 44_100;

// Oscillators and noise
pub use oscillators::{chirp, pink_noise, sine, white_noise, DEFAULT_PINK_ALPHA};

// Envelope
pub use envelope::Envelope;

// Spectral shaping
pub use filters::{convolve_same, high_pass_subtract, moving_average};

// Cue recipes
pub use cues::{Cue, CueComposer};

// PCM conversion and WAV container
pub use export::{
    apply_gain, decode_wav, encode_wav, from_pcm_i16, mix, to_pcm_i16, DecodedWav, WAV_HEADER_LEN,
};

/// Number of samples covering `duration` seconds at `sample_rate`.
///
/// Rounds to the nearest sample, so 0.14s at 44.1kHz is 6174 samples even
/// though the product is not exactly representable.
pub fn samples_for(duration: f64, sample_rate: u32) -> Result<usize> {
    check_duration("duration", duration)?;
    Ok((duration * f64::from(sample_rate)).round() as usize)
}

/// Truncating seconds-to-samples conversion used for envelope phases.
pub(crate) fn phase_samples(name: &'static str, seconds: f64, sample_rate: u32) -> Result<usize> {
    check_duration(name, seconds)?;
    Ok((seconds * f64::from(sample_rate)) as usize)
}

fn check_duration(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SynthError::InvalidDuration { name, value })
    }
}

pub(crate) fn check_frequency(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SynthError::InvalidFrequency { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_for_recipe_durations() {
        assert_eq!(samples_for(0.25, SAMPLE_RATE).unwrap(), 11025);
        assert_eq!(samples_for(0.2, SAMPLE_RATE).unwrap(), 8820);
        assert_eq!(samples_for(0.14, SAMPLE_RATE).unwrap(), 6174);
        assert_eq!(samples_for(0.04, SAMPLE_RATE).unwrap(), 1764);
        assert_eq!(samples_for(1.0, SAMPLE_RATE).unwrap(), 44100);
    }

    #[test]
    fn test_samples_for_zero() {
        assert_eq!(samples_for(0.0, SAMPLE_RATE).unwrap(), 0);
    }

    #[test]
    fn test_samples_for_rejects_negative() {
        let err = samples_for(-0.1, SAMPLE_RATE).unwrap_err();
        assert!(matches!(err, SynthError::InvalidDuration { .. }));
    }

    #[test]
    fn test_samples_for_rejects_nan() {
        assert!(samples_for(f64::NAN, SAMPLE_RATE).is_err());
    }

    #[test]
    fn test_phase_samples_truncates() {
        // 0.015 * 44100 = 661.5
        assert_eq!(phase_samples("decay", 0.015, SAMPLE_RATE).unwrap(), 661);
        // 0.002 * 44100 = 88.2
        assert_eq!(phase_samples("attack", 0.002, SAMPLE_RATE).unwrap(), 88);
    }
}
