//! Procedural placeholder sound effects
//!
//! Synthesizes the five short feedback cues (`drop`, `land`, `trim`, `warn`,
//! `gameover`) from a handful of buffer-level primitives and encodes them as
//! mono 16-bit PCM WAV data held in memory. Writing the files is left to the
//! caller (see the `gen-sfx` tool).
//!
//! # Example
//! ```
//! use rand::SeedableRng;
//! use sfx_synth::audio::*;
//!
//! let composer = CueComposer::default();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let land = composer.render(Cue::Land, &mut rng)?;
//! assert_eq!(land.len(), 8820);
//!
//! let wav = encode_wav(&land, SAMPLE_RATE)?;
//! assert_eq!(wav.len(), WAV_HEADER_LEN + 8820 * 2);
//! # Ok::<(), sfx_synth::SynthError>(())
//! ```

pub mod audio;
pub mod error;

pub use error::{Result, SynthError};
