//! Effects amplifier: distortion, delay, flanger, chorus and reverb, recording the
//! processed output to a WAV file until escape is pressed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, RecvTimeoutError};
use micro_rig::capture::{RecordFlag, Recorder};
use micro_rig::control::{apply, Flow, KeyMap};
use micro_rig::fx::{FxConfig, FxRack};
use micro_rig::params::{Param, ParameterStore};
use rig_host::{
    capture_queue, init_logging, print_line, show_status, AmpProcessor, AudioHost, CaptureWriter,
    KeyReader, Meter, RawMode, StreamArgs, StreamConfig,
};
use tracing::{info, warn};

const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "amp-fx")]
#[command(about = "Guitar amplifier with effects, recording to a WAV file", long_about = None)]
struct Cli {
    #[command(flatten)]
    stream: StreamArgs,

    /// Where to write the recording
    #[arg(short, long, default_value = "output.wav")]
    output: PathBuf,

    /// Seconds of audio the capture queue can hold before samples are dropped
    #[arg(long, default_value_t = 4.0)]
    capture_seconds: f32,

    /// Delay time in seconds
    #[arg(long, default_value_t = 1.0)]
    delay_seconds: f32,

    /// LFO rate of the flanger in Hz, the chorus runs at half this rate
    #[arg(long, default_value_t = 0.5)]
    lfo_rate: f32,
}

fn status(params: &ParameterStore, meter: &Meter) -> String {
    format!(
        "Gain {:.1} | Delay {:.1} | Reverb {:.1} | Flanger {:.1} | Chorus {:.1} | Peak {:.2} | {}",
        params.get(Param::Gain),
        params.get(Param::DelayMix),
        params.get(Param::ReverbMix),
        params.get(Param::FlangerMix),
        params.get(Param::ChorusMix),
        meter.peak,
        if meter.recording { "REC" } else { "stopped" }
    )
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let stream_config = cli.stream.to_config(StreamConfig::default())?;
    if !(cli.delay_seconds > 0.0) || !(cli.capture_seconds > 0.0) {
        anyhow::bail!("Delay and capture lengths must be positive");
    }

    let fx_config = FxConfig {
        max_delay_seconds: cli.delay_seconds,
        lfo_rate_hz: cli.lfo_rate,
        ..FxConfig::default()
    };
    let sample_rate = stream_config.sample_rate as f32;
    let chain = FxRack::new(sample_rate, fx_config);
    let params = Arc::new(ParameterStore::fx_rack());

    let (sink, from_audio_thread) = capture_queue((cli.capture_seconds * sample_rate) as usize);
    // The file is created before the stream starts, so an unwritable path never opens audio.
    let mut writer = CaptureWriter::create(
        &cli.output,
        stream_config.sample_rate as u32,
        from_audio_thread,
    )
    .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let record_flag = RecordFlag::new(true);
    let recorder = Recorder::new(sink, record_flag.clone());

    let mut host = AudioHost::<Meter>::duplex(
        &stream_config,
        AmpProcessor::new(chain, params.clone(), Some(recorder)),
    )
    .context("Failed to start the audio stream")?;

    let raw_mode = RawMode::enable()?;
    print_line(
        "Effects amp running. w/s gain, a/d delay, q/e reverb, r/f flanger, t/g chorus, \
         x stops recording, ESC quits.",
    )?;
    let (to_control_loop, commands) = unbounded();
    let key_reader = KeyReader::spawn(KeyMap::fx_rack(), to_control_loop);

    let mut meter = Meter::default();
    let mut reported_drops = 0;
    loop {
        writer.drain()?;
        while let Ok(latest) = host.from_audio_thread.pop() {
            meter = latest;
        }
        if meter.dropped_samples > reported_drops {
            warn!(
                "Capture queue full, {} samples dropped",
                meter.dropped_samples - reported_drops
            );
            reported_drops = meter.dropped_samples;
        }
        show_status(&status(&params, &meter))?;

        match commands.recv_timeout(REFRESH_INTERVAL) {
            Ok(command) => match apply(command, &params) {
                Flow::Changed(param, value) => info!("{} set to {}", param.name(), value),
                Flow::StopRecording => record_flag.stop(),
                Flow::Quit => break,
                Flow::Continue => {}
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    record_flag.stop();
    key_reader.stop();
    host.stop()?;
    host.close()?;
    let written_samples = writer.finalize()?;
    drop(raw_mode);
    println!();
    println!(
        "Saved {} seconds of audio to {}",
        (written_samples as f64) / stream_config.sample_rate,
        cli.output.display()
    );
    Ok(())
}
