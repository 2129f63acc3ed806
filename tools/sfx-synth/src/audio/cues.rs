//! Feedback cue recipes
//!
//! The five placeholder cues, each a fixed combination of the primitives in
//! this module tree. Recipes that use noise take the random source as an
//! argument; given the same seeded generator they produce identical buffers.
//!
//! | Cue        | Length                | Character                              |
//! |------------|-----------------------|----------------------------------------|
//! | `drop`     | 0.25s                 | soft whoosh of brightened pink noise   |
//! | `land`     | 0.20s                 | muted 120 Hz thump with a noise click  |
//! | `trim`     | 0.20s                 | bright noise snap plus a 2.1 kHz ping  |
//! | `warn`     | 0.14s + 0.04s + 0.14s | two beeps, 740 Hz then 1040 Hz         |
//! | `gameover` | 1.00s                 | calm descending sweep, 800 to 220 Hz   |

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::envelope::Envelope;
use super::export::{apply_gain, mix};
use super::filters::high_pass_subtract;
use super::oscillators::{chirp, pink_noise, sine, white_noise, DEFAULT_PINK_ALPHA};
use super::{samples_for, SAMPLE_RATE};
use crate::error::{Result, SynthError};

// drop: brightened pink noise
const DROP_DURATION: f64 = 0.25;
const DROP_ENV: Envelope = Envelope::new(0.01, 0.03, 0.2, 0.08);
const DROP_SMOOTH_TAPS: usize = 200;
const DROP_SMOOTH_WEIGHT: f32 = 0.6;
const DROP_GAIN: f32 = 0.25;

// land: low sine body + noise transient
const LAND_DURATION: f64 = 0.2;
const LAND_BODY_FREQ: f64 = 120.0;
const LAND_BODY_ENV: Envelope = Envelope::new(0.002, 0.06, 0.0, 0.06);
const LAND_BODY_GAIN: f32 = 0.4;
const LAND_CLICK_ENV: Envelope = Envelope::new(0.0, 0.015, 0.0, 0.03);
const LAND_CLICK_GAIN: f32 = 0.05;

// trim: high-passed noise burst + ping
const TRIM_DURATION: f64 = 0.2;
const TRIM_BURST_TAPS: usize = 40;
const TRIM_BURST_ENV: Envelope = Envelope::new(0.0, 0.02, 0.0, 0.06);
const TRIM_BURST_GAIN: f32 = 0.22;
const TRIM_PING_FREQ: f64 = 2100.0;
const TRIM_PING_ENV: Envelope = Envelope::new(0.001, 0.03, 0.0, 0.05);
const TRIM_PING_GAIN: f32 = 0.12;

// warn: two beeps low -> high
const WARN_BEEP_DURATION: f64 = 0.14;
const WARN_GAP_DURATION: f64 = 0.04;
const WARN_BEEP_FREQS: [f64; 2] = [740.0, 1040.0];
const WARN_ENV: Envelope = Envelope::new(0.001, 0.05, 0.0, 0.06);
const WARN_GAIN: f32 = 0.25;

// gameover: descending sweep
const GAMEOVER_DURATION: f64 = 1.0;
const GAMEOVER_FREQS: (f64, f64) = (800.0, 220.0);
const GAMEOVER_ENV: Envelope = Envelope::new(0.01, 0.15, 0.4, 0.25);
const GAMEOVER_GAIN: f32 = 0.2;

/// One of the fixed feedback cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Drop,
    Land,
    Trim,
    Warn,
    GameOver,
}

impl Cue {
    /// Every cue, in output order
    pub const ALL: [Cue; 5] = [Cue::Drop, Cue::Land, Cue::Trim, Cue::Warn, Cue::GameOver];

    /// Name used for lookup and as the file stem
    pub fn name(self) -> &'static str {
        match self {
            Cue::Drop => "drop",
            Cue::Land => "land",
            Cue::Trim => "trim",
            Cue::Warn => "warn",
            Cue::GameOver => "gameover",
        }
    }

    /// Output file name, e.g. `drop.wav`
    pub fn file_name(self) -> String {
        format!("{}.wav", self.name())
    }

    /// Short description of the sound
    pub fn description(self) -> &'static str {
        match self {
            Cue::Drop => "soft whoosh",
            Cue::Land => "muted thump",
            Cue::Trim => "slicing snap",
            Cue::Warn => "two rising beeps",
            Cue::GameOver => "descending sweep",
        }
    }

    /// Total length in seconds
    pub fn duration(self) -> f64 {
        match self {
            Cue::Drop => DROP_DURATION,
            Cue::Land => LAND_DURATION,
            Cue::Trim => TRIM_DURATION,
            Cue::Warn => 2.0 * WARN_BEEP_DURATION + WARN_GAP_DURATION,
            Cue::GameOver => GAMEOVER_DURATION,
        }
    }

    /// Position in [`Cue::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the recipe draws from the random source
    pub fn uses_noise(self) -> bool {
        matches!(self, Cue::Drop | Cue::Land | Cue::Trim)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cue {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        Cue::ALL
            .into_iter()
            .find(|cue| cue.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SynthError::UnknownCue(s.to_string()))
    }
}

/// Renders the cue recipes at a given sample rate
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use sfx_synth::audio::{Cue, CueComposer};
///
/// let composer = CueComposer::default();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
///
/// for cue in Cue::ALL {
///     let samples = composer.render(cue, &mut rng)?;
///     assert!(!samples.is_empty());
/// }
/// # Ok::<(), sfx_synth::SynthError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CueComposer {
    sample_rate: u32,
}

impl Default for CueComposer {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl CueComposer {
    /// Create a composer rendering at `sample_rate`
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render any cue by name
    pub fn render<R: Rng + ?Sized>(&self, cue: Cue, rng: &mut R) -> Result<Vec<f32>> {
        let samples = match cue {
            Cue::Drop => self.drop(rng)?,
            Cue::Land => self.land(rng)?,
            Cue::Trim => self.trim(rng)?,
            Cue::Warn => self.warn()?,
            Cue::GameOver => self.gameover()?,
        };
        tracing::debug!(
            cue = cue.name(),
            samples = samples.len(),
            sample_rate = self.sample_rate,
            "rendered cue"
        );
        Ok(samples)
    }

    /// Soft short whoosh: pink noise with its slow component partly removed
    pub fn drop<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f32>> {
        let len = samples_for(DROP_DURATION, self.sample_rate)?;

        let noise = pink_noise(len, DEFAULT_PINK_ALPHA, rng)?;
        let mut whoosh = high_pass_subtract(&noise, DROP_SMOOTH_TAPS, DROP_SMOOTH_WEIGHT)?;

        let env = DROP_ENV.generate(len, self.sample_rate)?;
        apply_gain(&mut whoosh, &env, DROP_GAIN)?;
        Ok(whoosh)
    }

    /// Muted thump: fast-decaying low sine plus a tiny noise transient
    pub fn land<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f32>> {
        let len = samples_for(LAND_DURATION, self.sample_rate)?;

        let mut body = sine(LAND_BODY_FREQ, len, self.sample_rate)?;
        LAND_BODY_ENV.apply(&mut body, self.sample_rate)?;

        let mut click = white_noise(len, rng);
        LAND_CLICK_ENV.apply(&mut click, self.sample_rate)?;

        Ok(mix(&[
            (body.as_slice(), LAND_BODY_GAIN),
            (click.as_slice(), LAND_CLICK_GAIN),
        ]))
    }

    /// Slicing snap: bright noise burst plus a high-mid ping
    pub fn trim<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f32>> {
        let len = samples_for(TRIM_DURATION, self.sample_rate)?;

        let burst = white_noise(len, rng);
        let mut bright = high_pass_subtract(&burst, TRIM_BURST_TAPS, 1.0)?;
        TRIM_BURST_ENV.apply(&mut bright, self.sample_rate)?;

        let mut ping = sine(TRIM_PING_FREQ, len, self.sample_rate)?;
        TRIM_PING_ENV.apply(&mut ping, self.sample_rate)?;

        Ok(mix(&[
            (bright.as_slice(), TRIM_BURST_GAIN),
            (ping.as_slice(), TRIM_PING_GAIN),
        ]))
    }

    /// Two short beeps, low then high, separated by silence
    pub fn warn(&self) -> Result<Vec<f32>> {
        let beep_len = samples_for(WARN_BEEP_DURATION, self.sample_rate)?;
        let gap_len = samples_for(WARN_GAP_DURATION, self.sample_rate)?;
        let env = WARN_ENV.generate(beep_len, self.sample_rate)?;

        let mut out = vec![0.0f32; 2 * beep_len + gap_len];
        for (slot, &freq) in WARN_BEEP_FREQS.iter().enumerate() {
            let mut beep = sine(freq, beep_len, self.sample_rate)?;
            apply_gain(&mut beep, &env, WARN_GAIN)?;

            let start = slot * (beep_len + gap_len);
            out[start..start + beep_len].copy_from_slice(&beep);
        }
        Ok(out)
    }

    /// Calm descending tone sweep
    pub fn gameover(&self) -> Result<Vec<f32>> {
        let len = samples_for(GAMEOVER_DURATION, self.sample_rate)?;
        let (start_freq, end_freq) = GAMEOVER_FREQS;

        let mut sweep = chirp(start_freq, end_freq, len, self.sample_rate)?;
        let env = GAMEOVER_ENV.generate(len, self.sample_rate)?;
        apply_gain(&mut sweep, &env, GAMEOVER_GAIN)?;
        Ok(sweep)
    }
}
