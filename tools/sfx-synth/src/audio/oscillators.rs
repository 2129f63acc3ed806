//! Oscillators and noise sources
//!
//! Deterministic tone generators plus seeded Gaussian noise. Phase is always
//! evaluated in `f64` and only the finished sample is narrowed to `f32`.

use std::f64::consts::TAU;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::check_frequency;
use crate::error::{Result, SynthError};

/// One-pole smoothing coefficient giving the pink-like noise its tilt
pub const DEFAULT_PINK_ALPHA: f64 = 0.06;

/// Peak floor used when normalizing (all-zero noise stays zero)
const NORMALIZE_FLOOR: f64 = 1e-6;

/// Generate `len` samples of a sine wave
///
/// Sample `i` is `sin(2π · (frequency · i / sample_rate))`.
pub fn sine(frequency: f64, len: usize, sample_rate: u32) -> Result<Vec<f32>> {
    check_frequency("frequency", frequency)?;

    let sr = f64::from(sample_rate);
    Ok((0..len)
        .map(|i| {
            let t = i as f64 / sr;
            (TAU * (frequency * t)).sin() as f32
        })
        .collect())
}

/// Generate a linear frequency sweep from `start_freq` to `end_freq`
///
/// The phase is the integral of the linearly moving frequency,
/// `2π · (f0·t + k·t²/2)` with `k = (f1 - f0) / T` and `T = len / sample_rate`,
/// so the waveform stays continuous across the whole sweep. With
/// `start_freq == end_freq` the output is identical to [`sine`].
pub fn chirp(start_freq: f64, end_freq: f64, len: usize, sample_rate: u32) -> Result<Vec<f32>> {
    check_frequency("start frequency", start_freq)?;
    check_frequency("end frequency", end_freq)?;
    if len == 0 {
        return Ok(Vec::new());
    }

    let sr = f64::from(sample_rate);
    let duration = len as f64 / sr;
    let rate = (end_freq - start_freq) / duration;

    Ok((0..len)
        .map(|i| {
            let t = i as f64 / sr;
            (TAU * (start_freq * t + 0.5 * rate * t * t)).sin() as f32
        })
        .collect())
}

/// Draw `len` samples of zero-mean, unit-variance Gaussian white noise
///
/// The output is not normalized; individual samples regularly exceed 1.0.
pub fn white_noise<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f32> {
    (0..len)
        .map(|_| {
            let draw: f64 = StandardNormal.sample(&mut *rng);
            draw as f32
        })
        .collect()
}

/// Generate low-frequency-weighted ("pink-like") noise with a peak of 1.0
///
/// Gaussian white noise is run through the one-pole recurrence
/// `out[i] = out[i-1] + alpha · (white[i] - out[i-1])` starting from
/// `out[0] = 0`, then divided by its peak magnitude. This only tilts the
/// spectrum; it is not a true 1/f shape.
///
/// `len` draws are always taken from `rng`, including the first one that the
/// recurrence ignores, so the random stream advances the same amount for a
/// given length.
pub fn pink_noise<R: Rng + ?Sized>(len: usize, alpha: f64, rng: &mut R) -> Result<Vec<f32>> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(SynthError::InvalidSmoothing(alpha));
    }

    let white: Vec<f64> = (0..len).map(|_| StandardNormal.sample(&mut *rng)).collect();

    let mut smoothed = vec![0.0f64; len];
    for i in 1..len {
        smoothed[i] = smoothed[i - 1] + alpha * (white[i] - smoothed[i - 1]);
    }

    let peak = smoothed
        .iter()
        .fold(NORMALIZE_FLOOR, |peak, &s| peak.max(s.abs()));

    Ok(smoothed.iter().map(|&s| (s / peak) as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLE_RATE;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sine_wave() {
        let samples = sine(440.0, 441, SAMPLE_RATE).unwrap();
        assert_eq!(samples.len(), 441);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_sine_quarter_period() {
        // 11025 Hz at 44.1kHz: one quarter period per sample
        let samples = sine(11025.0, 2, SAMPLE_RATE).unwrap();
        assert!((samples[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sine_rejects_negative_frequency() {
        let err = sine(-1.0, 10, SAMPLE_RATE).unwrap_err();
        assert!(matches!(err, SynthError::InvalidFrequency { .. }));
    }

    #[test]
    fn test_chirp_without_sweep_matches_sine() {
        for &freq in &[120.0, 740.0, 2100.0] {
            let tone = sine(freq, 4410, SAMPLE_RATE).unwrap();
            let sweep = chirp(freq, freq, 4410, SAMPLE_RATE).unwrap();
            assert_eq!(tone, sweep, "flat chirp at {freq} Hz should be a pure tone");
        }
    }

    #[test]
    fn test_chirp_sweeps_downwards() {
        let n = 44100;
        let sweep = chirp(800.0, 220.0, n, SAMPLE_RATE).unwrap();
        assert_eq!(sweep.len(), n);

        let crossings = |s: &[f32]| s.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count();
        let head = crossings(&sweep[..4410]);
        let tail = crossings(&sweep[n - 4410..]);
        // ~78 cycles in the first 100ms, ~25 in the last
        assert!(head > tail * 2, "head {head} vs tail {tail}");
    }

    #[test]
    fn test_chirp_empty() {
        assert!(chirp(800.0, 220.0, 0, SAMPLE_RATE).unwrap().is_empty());
    }

    #[test]
    fn test_white_noise_reproducibility() {
        let a = white_noise(256, &mut Pcg32::seed_from_u64(42));
        let b = white_noise(256, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_white_noise_statistics() {
        let samples = white_noise(20_000, &mut Pcg32::seed_from_u64(1));
        let mean = samples.iter().map(|&s| f64::from(s)).sum::<f64>() / samples.len() as f64;
        let var = samples
            .iter()
            .map(|&s| (f64::from(s) - mean).powi(2))
            .sum::<f64>()
            / samples.len() as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.1, "variance {var}");
    }

    #[test]
    fn test_pink_noise_peak_is_one() {
        let mut rng = Pcg32::seed_from_u64(12345);
        for len in [2, 10, 1000, 11025] {
            let samples = pink_noise(len, DEFAULT_PINK_ALPHA, &mut rng).unwrap();
            let peak = samples.iter().fold(0.0f32, |p, s| p.max(s.abs()));
            assert!((peak - 1.0).abs() < 1e-6, "peak {peak} for len {len}");
        }
    }

    #[test]
    fn test_pink_noise_starts_at_zero() {
        let samples = pink_noise(100, DEFAULT_PINK_ALPHA, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn test_pink_noise_empty() {
        let samples = pink_noise(0, DEFAULT_PINK_ALPHA, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_pink_noise_rejects_bad_alpha() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(pink_noise(10, 0.0, &mut rng).is_err());
        assert!(pink_noise(10, 1.5, &mut rng).is_err());
        assert!(pink_noise(10, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_pink_noise_is_smoother_than_white() {
        let mut rng = Pcg32::seed_from_u64(9);
        let pink = pink_noise(4096, DEFAULT_PINK_ALPHA, &mut rng).unwrap();

        // Mean absolute first difference relative to peak stays small
        let roughness =
            pink.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f32>() / pink.len() as f32;
        assert!(roughness < 0.2, "roughness {roughness}");
    }
}
