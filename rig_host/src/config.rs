//! Command line configuration shared by the programs.

use clap::{Args, ValueEnum};
use micro_rig::common::WindowFunction;
use micro_rig::fx::{CleanConfig, FilterMode};
use micro_rig::tuner::{is_supported_window_size, DEFAULT_WINDOW_SIZE};

use crate::error::{HostError, HostResult};

/// Block size of the amp programs.
pub const DEFAULT_BLOCK_SIZE: u32 = 256;
/// Block size of the tuner.
pub const DEFAULT_TUNER_BLOCK_SIZE: u32 = 1024;
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Sample rate and block size of an audio stream. Streams are always mono `f32`,
/// except for playback, which uses the channel count of the played file.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StreamConfig {
    pub sample_rate: f64,
    pub block_size: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl StreamConfig {
    pub fn tuner() -> Self {
        StreamConfig {
            block_size: DEFAULT_TUNER_BLOCK_SIZE,
            ..StreamConfig::default()
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct StreamArgs {
    /// Sample rate in Hz
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: f64,

    /// Frames per audio callback (defaults to 256, or 1024 for the tuner)
    #[arg(short, long)]
    pub block_size: Option<u32>,
}

impl StreamArgs {
    /// Builds a validated stream config, using `defaults` for flags that were not given.
    pub fn to_config(&self, defaults: StreamConfig) -> HostResult<StreamConfig> {
        if !(self.sample_rate > 0.0) {
            return Err(HostError::Config(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        let block_size = self.block_size.unwrap_or(defaults.block_size);
        if block_size == 0 {
            return Err(HostError::Config("block size must be positive".to_string()));
        }
        Ok(StreamConfig {
            sample_rate: self.sample_rate,
            block_size,
        })
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FilterModeArg {
    /// Low pass and high pass keep separate histories
    #[default]
    Independent,
    /// Low pass and high pass share one history value
    Coupled,
}

impl From<FilterModeArg> for FilterMode {
    fn from(arg: FilterModeArg) -> Self {
        match arg {
            FilterModeArg::Independent => FilterMode::Independent,
            FilterModeArg::Coupled => FilterMode::Coupled,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct CleanArgs {
    /// Per sample decay of the noise gate while below the threshold
    #[arg(long, default_value_t = micro_rig::fx::DEFAULT_RELEASE)]
    pub gate_release: f32,

    /// How the tone filters keep their history
    #[arg(long, value_enum, default_value_t = FilterModeArg::default())]
    pub filter_mode: FilterModeArg,
}

impl CleanArgs {
    pub fn to_config(&self) -> CleanConfig {
        CleanConfig {
            gate_release: self.gate_release,
            filter_mode: self.filter_mode.into(),
            ..CleanConfig::default()
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WindowArg {
    #[default]
    Rectangular,
    Hann,
}

impl From<WindowArg> for WindowFunction {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Rectangular => WindowFunction::Rectangular,
            WindowArg::Hann => WindowFunction::Hann,
        }
    }
}

/// Analysis settings of the tuner.
#[derive(Args, Clone, Debug)]
pub struct TunerConfig {
    /// Analysis window size, a power of two from 8 to 4096
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Window function applied before the FFT
    #[arg(long, value_enum, default_value_t = WindowArg::default())]
    pub window: WindowArg,
}

impl Default for TunerConfig {
    fn default() -> Self {
        TunerConfig {
            window_size: DEFAULT_WINDOW_SIZE,
            window: WindowArg::default(),
        }
    }
}

impl TunerConfig {
    pub fn validate(&self) -> HostResult<()> {
        if is_supported_window_size(self.window_size) {
            Ok(())
        } else {
            Err(HostError::Config(format!(
                "window size must be a power of two from 8 to 4096, got {}",
                self.window_size
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_defaults() {
        let args = StreamArgs {
            sample_rate: 48000.0,
            block_size: None,
        };
        let config = args.to_config(StreamConfig::tuner()).unwrap();
        assert_eq!(config.sample_rate, 48000.0);
        assert_eq!(config.block_size, 1024);

        let args = StreamArgs {
            sample_rate: 44100.0,
            block_size: Some(128),
        };
        assert_eq!(args.to_config(StreamConfig::default()).unwrap().block_size, 128);
    }

    #[test]
    fn test_invalid_stream_config() {
        let args = StreamArgs {
            sample_rate: 0.0,
            block_size: None,
        };
        assert!(matches!(
            args.to_config(StreamConfig::default()),
            Err(HostError::Config(_))
        ));
        let args = StreamArgs {
            sample_rate: 44100.0,
            block_size: Some(0),
        };
        assert!(args.to_config(StreamConfig::default()).is_err());
    }

    #[test]
    fn test_tuner_config() {
        assert!(TunerConfig::default().validate().is_ok());
        let config = TunerConfig {
            window_size: 3000,
            window: WindowArg::Hann,
        };
        assert!(matches!(config.validate(), Err(HostError::Config(_))));
    }

    #[test]
    fn test_clean_args() {
        let args = CleanArgs {
            gate_release: 0.9,
            filter_mode: FilterModeArg::Coupled,
        };
        let config = args.to_config();
        assert_eq!(config.gate_release, 0.9);
        assert_eq!(config.filter_mode, FilterMode::Coupled);
    }
}
