//! Error type for cue synthesis and encoding.

/// Errors raised while synthesizing or encoding a cue.
///
/// Parameter errors indicate a misconfigured recipe. They are never clamped
/// away, so a bad constant surfaces the first time the recipe runs.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("{name} must be a finite, non-negative duration (got {value}s)")]
    InvalidDuration { name: &'static str, value: f64 },

    #[error("{name} must be a finite, non-negative frequency (got {value} Hz)")]
    InvalidFrequency { name: &'static str, value: f64 },

    #[error("Sustain level must be within 0.0..=1.0 (got {0})")]
    InvalidSustain(f64),

    #[error("Smoothing coefficient must be within (0.0, 1.0] (got {0})")]
    InvalidSmoothing(f64),

    #[error("Gain envelope has {envelope} samples but the buffer has {samples}")]
    LengthMismatch { samples: usize, envelope: usize },

    #[error("Convolution kernel must have at least one tap")]
    EmptyKernel,

    #[error("Unknown cue: {0:?}")]
    UnknownCue(String),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SynthError>;
