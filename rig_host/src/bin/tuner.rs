//! Guitar tuner: shows the note closest to the dominant input frequency.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, RecvTimeoutError};
use micro_rig::control::{Command, KeyMap};
use micro_rig::tuner::{DetectionResult, Detector};
use rig_host::{
    cents_bar, format_detection, init_logging, print_line, show_status, AudioHost, KeyReader,
    RawMode, Reading, StreamArgs, StreamConfig, TunerConfig, TunerProcessor,
};

const REFRESH_INTERVAL: Duration = Duration::from_millis(50);
const CENTS_BAR_WIDTH: usize = 41;

#[derive(Parser)]
#[command(name = "tuner")]
#[command(about = "FFT based guitar tuner", long_about = None)]
struct Cli {
    #[command(flatten)]
    stream: StreamArgs,

    #[command(flatten)]
    tuner: TunerConfig,

    /// Print every reading as a line of JSON instead of a status line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let stream_config = cli.stream.to_config(StreamConfig::tuner())?;
    cli.tuner.validate()?;

    let detector = Detector::from_options(
        stream_config.sample_rate as f32,
        cli.tuner.window_size,
        cli.tuner.window.into(),
    );
    let processor = TunerProcessor::new(detector);
    let mut host = AudioHost::<DetectionResult>::input(&stream_config, processor)
        .context("Failed to start the audio stream")?;

    let raw_mode = RawMode::enable()?;
    print_line("Tuner running. 'q', ESC or Ctrl-C quits.")?;
    let (to_control_loop, commands) = unbounded();
    let key_reader = KeyReader::spawn(KeyMap::tuner(), to_control_loop);

    loop {
        let mut latest = None;
        while let Ok(result) = host.from_audio_thread.pop() {
            if cli.json {
                print_line(&serde_json::to_string(&Reading::from(&result))?)?;
            }
            latest = Some(result);
        }
        if let (Some(result), false) = (latest, cli.json) {
            let bar = if result.is_silent() {
                String::new()
            } else {
                cents_bar(result.cents, CENTS_BAR_WIDTH)
            };
            show_status(&format!("{}  {}", format_detection(&result), bar))?;
        }

        match commands.recv_timeout(REFRESH_INTERVAL) {
            Ok(Command::Quit) => break,
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    key_reader.stop();
    host.stop()?;
    host.close()?;
    drop(raw_mode);
    println!();
    Ok(())
}
