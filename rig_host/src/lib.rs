mod audio;
mod config;
mod error;
mod processors;
mod terminal;
mod wav;

pub use audio::{AudioHost, AudioProcessor};
pub use config::{
    CleanArgs, FilterModeArg, StreamArgs, StreamConfig, TunerConfig, WindowArg, DEFAULT_BLOCK_SIZE,
    DEFAULT_SAMPLE_RATE, DEFAULT_TUNER_BLOCK_SIZE,
};
pub use error::{HostError, HostResult};
pub use processors::{AmpProcessor, Meter, PlaybackProcessor, TunerProcessor};
pub use terminal::{
    cents_bar, format_detection, key_command, print_line, show_status, KeyReader, RawMode,
};
pub use wav::{
    capture_queue, mix_files, read_wav, write_wav, CaptureWriter, RingCapture, WavClip, WavFormat,
};

use micro_rig::tuner::DetectionResult;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Sends log output to stderr, filtered by `RUST_LOG` and showing warnings and errors
/// by default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A tuner result in a form suitable for machine readable output.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Reading {
    pub frequency: f32,
    pub note: &'static str,
    pub octave: u8,
    pub target_frequency: f32,
    pub cents: f32,
    pub magnitude: f32,
}

impl From<&DetectionResult> for Reading {
    fn from(result: &DetectionResult) -> Self {
        Reading {
            frequency: result.frequency,
            note: result.note.name(),
            octave: result.octave,
            target_frequency: result.target_frequency,
            cents: result.cents,
            magnitude: result.magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_json() {
        let result = DetectionResult::from_peak(0, 0.0, 44100.0, 2048);
        let json = serde_json::to_value(Reading::from(&result)).unwrap();
        assert_eq!(json["note"], "C");
        assert_eq!(json["octave"], 0);
        assert_eq!(json["frequency"], 0.0);
    }
}
