//! Mixes two WAV files with the same sample rate and channel count at equal levels.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rig_host::{init_logging, mix_files, read_wav, AudioHost, PlaybackProcessor, StreamConfig};
use tracing::debug;

#[derive(Parser)]
#[command(name = "mixer")]
#[command(about = "Mixes two WAV files into a 16 bit WAV file", long_about = None)]
struct Cli {
    /// First input file
    file1: PathBuf,

    /// Second input file
    file2: PathBuf,

    /// Output file
    output: PathBuf,

    /// Play the mixed file after writing it
    #[arg(short, long)]
    play: bool,
}

fn play(path: &Path) -> Result<()> {
    let clip = read_wav(path)?;
    let stream_config = StreamConfig {
        sample_rate: clip.format.sample_rate as f64,
        ..StreamConfig::default()
    };
    let frame_count = clip.frame_count();
    let mut host = AudioHost::<usize>::output(
        &stream_config,
        clip.format.channel_count,
        PlaybackProcessor::new(clip.samples),
    )
    .context("Failed to start playback")?;

    println!("Playing {} frames", frame_count);
    while host.is_active()? {
        while let Ok(position) = host.from_audio_thread.pop() {
            debug!("Played {} samples", position);
        }
        thread::sleep(Duration::from_millis(100));
    }
    host.stop()?;
    host.close()?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (format, frame_count) = mix_files(&cli.file1, &cli.file2, &cli.output).with_context(|| {
        format!(
            "Failed to mix {} and {}",
            cli.file1.display(),
            cli.file2.display()
        )
    })?;
    println!(
        "Mixed {} frames ({} Hz, {} channels) into {}",
        frame_count,
        format.sample_rate,
        format.channel_count,
        cli.output.display()
    );

    if cli.play {
        play(&cli.output)?;
    }
    Ok(())
}
