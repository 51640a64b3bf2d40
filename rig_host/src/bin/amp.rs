//! Clean amplifier: noise gate, tone filters, gain and volume from input to output.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{unbounded, RecvTimeoutError};
use micro_rig::control::{apply, Flow, KeyMap};
use micro_rig::fx::CleanAmp;
use micro_rig::params::{Param, ParameterStore};
use rig_host::{
    init_logging, print_line, show_status, AmpProcessor, AudioHost, CleanArgs, KeyReader, Meter,
    RawMode, StreamArgs, StreamConfig,
};
use tracing::info;

const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "amp")]
#[command(about = "Clean guitar amplifier with a noise gate", long_about = None)]
struct Cli {
    #[command(flatten)]
    stream: StreamArgs,

    #[command(flatten)]
    clean: CleanArgs,
}

fn status(params: &ParameterStore, meter: &Meter) -> String {
    format!(
        "Gain {:.1} | Volume {:.1} | Noise gate {:.3} | Peak {:.2}",
        params.get(Param::Gain),
        params.get(Param::Volume),
        params.get(Param::NoiseThreshold),
        meter.peak
    )
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let stream_config = cli.stream.to_config(StreamConfig::default())?;

    let params = Arc::new(ParameterStore::clean_amp());
    let chain = CleanAmp::new(cli.clean.to_config());
    let processor = AmpProcessor::new(chain, params.clone(), None);
    let mut host = AudioHost::<Meter>::duplex(&stream_config, processor)
        .context("Failed to start the audio stream")?;

    let raw_mode = RawMode::enable()?;
    print_line("Amplifier running. '+'/'-' gain, '[' ']' volume, '{' '}' noise gate, 'q' quits.")?;
    let (to_control_loop, commands) = unbounded();
    let key_reader = KeyReader::spawn(KeyMap::clean_amp(), to_control_loop);

    let mut meter = Meter::default();
    loop {
        while let Ok(latest) = host.from_audio_thread.pop() {
            meter = latest;
        }
        show_status(&status(&params, &meter))?;

        match commands.recv_timeout(REFRESH_INTERVAL) {
            Ok(command) => match apply(command, &params) {
                Flow::Changed(param, value) => info!("{} set to {}", param.name(), value),
                Flow::Quit => break,
                Flow::Continue | Flow::StopRecording => {}
            },
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
