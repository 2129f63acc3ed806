//! AHDSR envelope generator
//!
//! Produces Attack-Hold-Decay-Sustain-Release gain curves for a buffer of a
//! known length.

use super::phase_samples;
use crate::error::{Result, SynthError};

/// AHDSR envelope parameters
///
/// Controls the amplitude shape of a sound over time:
/// - Attack: Linear ramp from 0 up to (but not including) 1
/// - Hold: Constant 1
/// - Decay: Linear ramp from 1 down to (but not including) the sustain level
/// - Sustain: Level held for whatever time the other phases leave over
/// - Release: Linear ramp from the sustain level down to exactly 0
///
/// Times are in seconds, the sustain level is a gain in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Attack time in seconds
    pub attack: f64,
    /// Hold time in seconds
    pub hold: f64,
    /// Decay time in seconds
    pub decay: f64,
    /// Sustain level (0.0 to 1.0)
    pub sustain: f64,
    /// Release time in seconds
    pub release: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.005,
            hold: 0.0,
            decay: 0.05,
            sustain: 0.2,
            release: 0.05,
        }
    }
}

impl Envelope {
    /// Create an envelope without a hold phase
    pub const fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            hold: 0.0,
            decay,
            sustain,
            release,
        }
    }

    /// Same envelope with a hold phase between attack and decay
    pub const fn with_hold(mut self, hold: f64) -> Self {
        self.hold = hold;
        self
    }

    /// Generate the envelope curve for a buffer of `len` samples
    ///
    /// The result always has exactly `len` samples. Phases that overrun the
    /// buffer are cut off; a buffer longer than all phases is padded with
    /// zeros. The sustain phase absorbs whatever length the other phases
    /// leave over.
    ///
    /// Attack, decay and release always contribute at least one sample, even
    /// when their duration truncates to zero samples. Hold and sustain
    /// contribute nothing in that case.
    pub fn generate(&self, len: usize, sample_rate: u32) -> Result<Vec<f32>> {
        if !(0.0..=1.0).contains(&self.sustain) {
            return Err(SynthError::InvalidSustain(self.sustain));
        }

        let attack = phase_samples("attack", self.attack, sample_rate)?;
        let hold = phase_samples("hold", self.hold, sample_rate)?;
        let decay = phase_samples("decay", self.decay, sample_rate)?;
        let release = phase_samples("release", self.release, sample_rate)?;
        let sustain = len.saturating_sub(attack + hold + decay + release);

        let mut curve = vec![0.0f32; len];
        let mut writer = PhaseWriter::new(&mut curve);

        writer.ramp(0.0, 1.0, attack, false);
        writer.fill(1.0, hold);
        writer.ramp(1.0, self.sustain, decay, false);
        writer.fill(self.sustain, sustain);
        writer.ramp(self.sustain, 0.0, release, true);

        Ok(curve)
    }

    /// Multiply `samples` in place by this envelope
    pub fn apply(&self, samples: &mut [f32], sample_rate: u32) -> Result<()> {
        let curve = self.generate(samples.len(), sample_rate)?;
        for (sample, gain) in samples.iter_mut().zip(&curve) {
            *sample *= gain;
        }
        Ok(())
    }
}

/// Sequential writer over a preallocated curve; writes past the end are dropped
struct PhaseWriter<'a> {
    out: &'a mut [f32],
    pos: usize,
}

impl<'a> PhaseWriter<'a> {
    fn new(out: &'a mut [f32]) -> Self {
        Self { out, pos: 0 }
    }

    fn is_full(&self) -> bool {
        self.pos >= self.out.len()
    }

    fn push(&mut self, value: f64) {
        if let Some(slot) = self.out.get_mut(self.pos) {
            *slot = value as f32;
        }
        self.pos += 1;
    }

    fn fill(&mut self, value: f64, count: usize) {
        for _ in 0..count {
            if self.is_full() {
                return;
            }
            self.push(value);
        }
    }

    /// Linear ramp of `count` samples stepping by `(end - start) / count`.
    ///
    /// An inclusive ramp forces its last sample to `end`. A ramp of one (or
    /// zero) samples is a single boundary value: `end` when inclusive,
    /// otherwise `start`.
    fn ramp(&mut self, start: f64, end: f64, count: usize, inclusive: bool) {
        if count <= 1 {
            self.push(if inclusive { end } else { start });
            return;
        }

        let step = (end - start) / count as f64;
        for i in 0..count {
            if self.is_full() {
                return;
            }
            let value = if inclusive && i == count - 1 {
                end
            } else {
                start + i as f64 * step
            };
            self.push(value);
        }
    }
}
