use tracing::debug;

use super::delay::Delay;
use super::distortion::distort;
use super::modulated_delay::ModulatedDelay;
use super::reverb::reverb;
use super::{map_block, Chain};
use crate::common::F32ArrayExt;
use crate::params::ParameterStore;

/// Construction time settings of an [FxRack].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FxConfig {
    /// Delay time of the echo, which is also the capacity of every delay line.
    pub max_delay_seconds: f32,
    /// Maximum flanger delay in milliseconds.
    pub flanger_depth_ms: f32,
    /// Maximum chorus delay in milliseconds.
    pub chorus_depth_ms: f32,
    /// Flanger LFO rate in Hz. The chorus LFO runs at half this rate.
    pub lfo_rate_hz: f32,
}

impl Default for FxConfig {
    fn default() -> Self {
        FxConfig {
            max_delay_seconds: 1.0,
            flanger_depth_ms: 5.0,
            chorus_depth_ms: 10.0,
            lfo_rate_hz: 0.5,
        }
    }
}

/// Gain, distortion, delay, flanger, chorus and reverb, in that order.
///
/// Reads [Param::Gain](crate::params::Param::Gain), [Param::Drive](crate::params::Param::Drive)
/// and the four mix parameters.
pub struct FxRack {
    delay: Delay,
    flanger: ModulatedDelay,
    chorus: ModulatedDelay,
}

impl FxRack {
    pub fn new(sample_rate: f32, config: FxConfig) -> Self {
        if !(sample_rate > 0.0) {
            panic!("Sample rate must be greater than 0")
        }
        let max_delay_samples = ((config.max_delay_seconds * sample_rate) as usize).max(1);
        debug!(
            "Effects rack: {} Hz, {} delay samples, {:?}",
            sample_rate, max_delay_samples, config
        );
        FxRack {
            delay: Delay::new(max_delay_samples),
            flanger: ModulatedDelay::new(
                sample_rate,
                max_delay_samples,
                config.flanger_depth_ms,
                config.lfo_rate_hz,
            ),
            chorus: ModulatedDelay::new(
                sample_rate,
                max_delay_samples,
                config.chorus_depth_ms,
                config.lfo_rate_hz / 2.0,
            ),
        }
    }

    pub fn delay(&self) -> &Delay {
        &self.delay
    }

    pub fn flanger(&self) -> &ModulatedDelay {
        &self.flanger
    }

    pub fn chorus(&self) -> &ModulatedDelay {
        &self.chorus
    }
}

impl Chain for FxRack {
    fn process(&mut self, input: &[f32], output: &mut [f32], params: &ParameterStore) {
        let params = params.snapshot();
        let delay = &mut self.delay;
        let flanger = &mut self.flanger;
        let chorus = &mut self.chorus;
        map_block(input, output, |sample| {
            let sample = sample * params.gain;
            let sample = distort(sample, params.drive);
            let sample = delay.process(sample, params.delay_mix);
            let sample = flanger.process(sample, params.flanger_mix);
            let sample = chorus.process(sample, params.chorus_mix);
            reverb(sample, params.reverb_mix)
        });
        output.clamp_to_unit();
    }

    fn reset(&mut self) {
        self.delay.reset();
        self.flanger.reset();
        self.chorus.reset();
    }
}
