//! Spectral shaping by moving-average convolution
//!
//! A boxcar kernel is the crude low-pass used by the cue recipes. The
//! high-pass-like variant is not a filter design of its own: it subtracts a
//! scaled low-pass copy from the original signal.
//!
//! Convolution uses "same" output length. Kernel taps that fall outside the
//! input are skipped rather than counted as zero-padded samples in a
//! renormalized average, so the effective gain drops towards both buffer edges.

use crate::error::{Result, SynthError};

/// Convolve `input` with `kernel`, keeping the input length
///
/// Output sample `i` is the sum over taps `k` of
/// `input[i - kernel.len() / 2 + k] * kernel[k]`, where taps landing outside
/// the input contribute nothing.
pub fn convolve_same(input: &[f32], kernel: &[f32]) -> Result<Vec<f32>> {
    if kernel.is_empty() {
        return Err(SynthError::EmptyKernel);
    }

    let len = input.len();
    let half = kernel.len() / 2;

    Ok((0..len)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .filter_map(|(k, &weight)| {
                    let j = (i + k).checked_sub(half)?;
                    input.get(j).map(|&x| f64::from(x) * f64::from(weight))
                })
                .sum::<f64>() as f32
        })
        .collect())
}

/// Boxcar low-pass: [`convolve_same`] with `taps` uniform weights of `1 / taps`
///
/// Evaluated as a windowed sum over a prefix table instead of tap by tap, so
/// the cost does not grow with the kernel width.
pub fn moving_average(input: &[f32], taps: usize) -> Result<Vec<f32>> {
    if taps == 0 {
        return Err(SynthError::EmptyKernel);
    }

    let len = input.len();
    let half = taps / 2;
    let weight = 1.0 / taps as f64;

    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0f64);
    let mut running = 0.0f64;
    for &x in input {
        running += f64::from(x);
        prefix.push(running);
    }

    Ok((0..len)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + taps - half).min(len);
            ((prefix[hi] - prefix[lo]) * weight) as f32
        })
        .collect())
}

/// High-pass-like shaping: `input - weight * moving_average(input, taps)`
pub fn high_pass_subtract(input: &[f32], taps: usize, weight: f32) -> Result<Vec<f32>> {
    let slow = moving_average(input, taps)?;
    Ok(input
        .iter()
        .zip(&slow)
        .map(|(&x, &low)| x - weight * low)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::white_noise;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_moving_average_matches_direct_convolution() {
        let input = white_noise(2000, &mut Pcg32::seed_from_u64(5));
        for taps in [1, 2, 7, 40, 200] {
            let kernel = vec![1.0 / taps as f32; taps];
            let direct = convolve_same(&input, &kernel).unwrap();
            let windowed = moving_average(&input, taps).unwrap();

            assert_eq!(direct.len(), input.len());
            for (a, b) in direct.iter().zip(&windowed) {
                assert!((a - b).abs() < 1e-5, "taps {taps}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_moving_average_edges_are_attenuated() {
        let input = vec![1.0f32; 16];
        let out = moving_average(&input, 4).unwrap();

        // Taps span i-2..=i+1, out-of-range taps are skipped
        assert_eq!(out[0], 0.5);
        assert_eq!(out[1], 0.75);
        assert_eq!(out[8], 1.0);
        assert_eq!(out[15], 0.75);
    }

    #[test]
    fn test_convolve_same_alignment() {
        // Odd kernel centred on the current sample
        let input = [0.0, 0.0, 1.0, 0.0, 0.0];
        let out = convolve_same(&input, &[0.25, 0.5, 0.25]).unwrap();
        assert_eq!(out, vec![0.0, 0.25, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_high_pass_subtract_removes_dc() {
        let input = vec![1.0f32; 100];
        let out = high_pass_subtract(&input, 10, 1.0).unwrap();
        assert!(out[20..80].iter().all(|&s| s.abs() < 1e-6));

        let partial = high_pass_subtract(&input, 10, 0.6).unwrap();
        assert!((partial[50] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_kernel_rejected() {
        assert!(matches!(
            convolve_same(&[1.0], &[]),
            Err(SynthError::EmptyKernel)
        ));
        assert!(matches!(
            moving_average(&[1.0], 0),
            Err(SynthError::EmptyKernel)
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(moving_average(&[], 200).unwrap().is_empty());
        assert!(high_pass_subtract(&[], 40, 1.0).unwrap().is_empty());
    }
}
