//! Placeholder feedback cue generator
//!
//! Renders the procedural feedback cues and writes one WAV per cue:
//! - drop.wav (soft whoosh)
//! - land.wav (muted thump)
//! - trim.wav (slicing snap)
//! - warn.wav (two rising beeps)
//! - gameover.wav (descending sweep)
//!
//! Every cue draws from its own PCG stream of the run seed, so a cue's bytes
//! depend only on the seed, never on which other cues were rendered or in
//! which order the worker threads finished.

use anyhow::{Context, Result};
use clap::Parser;
use rand_pcg::Pcg32;
use rayon::prelude::*;
use sfx_synth::audio::{decode_wav, encode_wav, Cue, CueComposer, SAMPLE_RATE, WAV_HEADER_LEN};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gen-sfx")]
#[command(about = "Generate placeholder feedback sounds as WAV files")]
#[command(version)]
struct Cli {
    /// Output directory
    #[arg(short, long, default_value = "assets/audio")]
    out_dir: PathBuf,

    /// Seed for the noise layers (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only generate these cues (repeatable)
    #[arg(short, long = "cue", value_name = "NAME")]
    cues: Vec<Cue>,

    /// List the available cues and exit
    #[arg(long)]
    list: bool,

    /// Read every written file back and check its header and length
    #[arg(long)]
    verify: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// An encoded cue ready to be written
struct RenderedCue {
    cue: Cue,
    sample_count: usize,
    wav: Vec<u8>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if cli.list {
        list_cues();
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let cues = selected_cues(&cli.cues);
    tracing::info!(
        "Generating {} cues into {:?} (seed {})",
        cues.len(),
        cli.out_dir,
        seed
    );

    let rendered = render_cues(&cues, seed)?;
    let written = write_cues(&cli.out_dir, &rendered)?;

    if cli.verify {
        for (path, cue) in written.iter().zip(&rendered) {
            verify_file(path, cue.sample_count)?;
        }
        tracing::info!("Verified {} files", written.len());
    }

    tracing::info!("Done!");
    Ok(())
}

fn list_cues() {
    for cue in Cue::ALL {
        println!(
            "{:<10} {:>5.2}s  {}",
            cue.name(),
            cue.duration(),
            cue.description()
        );
    }
}

/// Requested cues in order without duplicates; all cues when none requested
fn selected_cues(requested: &[Cue]) -> Vec<Cue> {
    if requested.is_empty() {
        return Cue::ALL.to_vec();
    }

    let mut cues = Vec::with_capacity(requested.len());
    for &cue in requested {
        if !cues.contains(&cue) {
            cues.push(cue);
        }
    }
    cues
}

/// Random source for one cue: stream `cue.index()` of the run seed
fn cue_rng(seed: u64, cue: Cue) -> Pcg32 {
    Pcg32::new(seed, cue.index() as u64)
}

fn render_cues(cues: &[Cue], seed: u64) -> Result<Vec<RenderedCue>> {
    let composer = CueComposer::new(SAMPLE_RATE);

    cues.par_iter()
        .map(|&cue| {
            let samples = composer
                .render(cue, &mut cue_rng(seed, cue))
                .with_context(|| format!("Failed to render {cue}"))?;
            let wav = encode_wav(&samples, composer.sample_rate())
                .with_context(|| format!("Failed to encode {cue}"))?;
            Ok(RenderedCue {
                cue,
                sample_count: samples.len(),
                wav,
            })
        })
        .collect()
}

fn write_cues(out_dir: &Path, rendered: &[RenderedCue]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;

    let mut written = Vec::with_capacity(rendered.len());
    for item in rendered {
        let path = out_dir.join(item.cue.file_name());
        fs::write(&path, &item.wav).with_context(|| format!("Failed to write {:?}", path))?;

        tracing::info!(
            "Wrote {} ({} samples, {:.2}s)",
            path.display(),
            item.sample_count,
            item.sample_count as f64 / f64::from(SAMPLE_RATE)
        );
        written.push(path);
    }
    Ok(written)
}

fn verify_file(path: &Path, sample_count: usize) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read back {:?}", path))?;
    let decoded = decode_wav(&bytes).with_context(|| format!("Failed to decode {:?}", path))?;

    if decoded.channels != 1 || decoded.bits_per_sample != 16 || decoded.sample_rate != SAMPLE_RATE
    {
        anyhow::bail!(
            "{:?}: expected mono 16-bit {} Hz, found {} channels, {}-bit, {} Hz",
            path,
            SAMPLE_RATE,
            decoded.channels,
            decoded.bits_per_sample,
            decoded.sample_rate
        );
    }
    if decoded.frames.len() != sample_count || bytes.len() != WAV_HEADER_LEN + sample_count * 2 {
        anyhow::bail!(
            "{:?}: expected {} frames, found {} ({} bytes)",
            path,
            sample_count,
            decoded.frames.len(),
            bytes.len()
        );
    }

    tracing::debug!("Verified {:?}", path);
    Ok(())
}
