use tracing::debug;

use super::filter::{FilterMode, ToneFilter, DEFAULT_HIGH_PASS_ALPHA, DEFAULT_LOW_PASS_ALPHA};
use super::gate::{NoiseGate, DEFAULT_RELEASE};
use super::{map_block, Chain};
use crate::common::F32ArrayExt;
use crate::params::ParameterStore;

/// Construction time settings of a [CleanAmp].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CleanConfig {
    /// Noise gate release factor per sample.
    pub gate_release: f32,
    pub low_pass_alpha: f32,
    pub high_pass_alpha: f32,
    pub filter_mode: FilterMode,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            gate_release: DEFAULT_RELEASE,
            low_pass_alpha: DEFAULT_LOW_PASS_ALPHA,
            high_pass_alpha: DEFAULT_HIGH_PASS_ALPHA,
            filter_mode: FilterMode::default(),
        }
    }
}

/// Noise gate, tone filter, gain and volume.
///
/// Reads [Param::Gain](crate::params::Param::Gain), [Param::Volume](crate::params::Param::Volume)
/// and [Param::NoiseThreshold](crate::params::Param::NoiseThreshold).
pub struct CleanAmp {
    gate: NoiseGate,
    tone: ToneFilter,
}

impl CleanAmp {
    pub fn new(config: CleanConfig) -> Self {
        debug!(
            "Clean amp: release {}, low pass {}, high pass {}, {:?} filters",
            config.gate_release, config.low_pass_alpha, config.high_pass_alpha, config.filter_mode
        );
        CleanAmp {
            gate: NoiseGate::new(config.gate_release),
            tone: ToneFilter::new(
                config.filter_mode,
                config.low_pass_alpha,
                config.high_pass_alpha,
            ),
        }
    }

    pub fn gate(&self) -> &NoiseGate {
        &self.gate
    }
}

impl Default for CleanAmp {
    fn default() -> Self {
        CleanAmp::new(CleanConfig::default())
    }
}

impl Chain for CleanAmp {
    fn process(&mut self, input: &[f32], output: &mut [f32], params: &ParameterStore) {
        let params = params.snapshot();
        let level = params.gain * params.volume;
        let gate = &mut self.gate;
        let tone = &mut self.tone;
        map_block(input, output, |sample| {
            let sample = gate.process(sample, params.noise_threshold);
            tone.process(sample) * level
        });
        output.clamp_to_unit();
    }

    fn reset(&mut self) {
        self.gate.reset();
        self.tone.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::vec;
    use crate::params::Param;

    #[test]
    fn test_block_length() {
        let params = ParameterStore::clean_amp();
        let mut amp = CleanAmp::default();
        for block_size in [1_usize, 64, 256, 1000].iter() {
            let input = vec![0.1; *block_size];
            let mut output = vec![1.0; *block_size];
            amp.process(&input, &mut output, &params);
            assert_eq!(output.len(), input.len());
        }

        // A longer output block gets a silent tail.
        let input = [0.5_f32; 4];
        let mut output = [1.0_f32; 6];
        amp.process(&input, &mut output, &params);
        assert_eq!(output[4..], [0.0, 0.0]);
    }

    #[test]
    fn test_output_is_clamped() {
        let params = ParameterStore::clean_amp();
        params.set(Param::Gain, 10.0);
        params.set(Param::Volume, 2.0);
        let mut amp = CleanAmp::default();
        let input = [0.9_f32; 512];
        let mut output = [0.0_f32; 512];
        amp.process(&input, &mut output, &params);
        assert!(output.iter().all(|s| *s >= -1.0 && *s <= 1.0));
        assert_eq!(output[511], 1.0);
    }

    #[test]
    fn test_gate_silences_noise() {
        let params = ParameterStore::clean_amp();
        let mut amp = CleanAmp::default();
        // Noise below the threshold never opens the closed gate.
        let noise = [0.001_f32, -0.002, 0.003, -0.001];
        let mut output = [1.0_f32; 4];
        amp.process(&noise, &mut output, &params);
        assert_eq!(output, [0.0; 4]);
    }

    #[test]
    fn test_coupled_chain_matches_reference() {
        let params = ParameterStore::clean_amp();
        let config = CleanConfig {
            filter_mode: FilterMode::Coupled,
            ..CleanConfig::default()
        };
        let mut amp = CleanAmp::new(config);
        let input = [0.3_f32, 0.2, -0.4, 0.0, 0.001, 0.5];
        let mut output = [0.0_f32; 6];
        amp.process(&input, &mut output, &params);

        let mut gate_level = 0.0_f32;
        let mut previous = 0.0_f32;
        for (sample, actual) in input.iter().zip(output.iter()) {
            if sample.abs() > 0.005 {
                gate_level = 1.0;
            } else {
                gate_level *= 0.99;
            }
            let gated = sample * gate_level;
            let low = 0.1 * gated + (1.0 - 0.1) * previous;
            let high = 0.9 * (previous + low - previous);
            previous = high;
            let expected = (high * (2.0 * 1.0)).max(-1.0).min(1.0);
            assert_eq!(*actual, expected);
        }
    }

    #[test]
    fn test_reset() {
        let params = ParameterStore::clean_amp();
        let mut amp = CleanAmp::default();
        amp.process(&[0.5; 16], &mut [0.0; 16], &params);
        assert_eq!(amp.gate().level(), 1.0);
        amp.reset();
        assert_eq!(amp.gate().level(), 0.0);
    }
}
