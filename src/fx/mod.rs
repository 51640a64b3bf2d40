//! Effect stages and the two effect chains built from them.
//!
//! Every stage owns its state and processes one sample at a time. A [Chain] runs
//! a fixed sequence of stages over a whole block:
//! * [CleanAmp]: noise gate, low pass, high pass, then gain and volume.
//! * [FxRack]: gain, distortion, delay, flanger, chorus, then reverb.
//!
//! Chains read the [ParameterStore] once at the start of each block, so a
//! parameter change made mid-block takes effect on the next block. The final
//! output is clamped to [-1, 1]; intermediate stages are not.

mod clean_amp;
mod delay;
mod distortion;
mod filter;
mod fx_rack;
mod gate;
mod modulated_delay;
mod reverb;

pub use clean_amp::{CleanAmp, CleanConfig};
pub use delay::{Delay, DelayLine};
pub use distortion::distort;
pub use filter::{
    high_pass, low_pass, FilterMode, ToneFilter, DEFAULT_HIGH_PASS_ALPHA, DEFAULT_LOW_PASS_ALPHA,
};
pub use fx_rack::{FxConfig, FxRack};
pub use gate::{NoiseGate, DEFAULT_RELEASE};
pub use modulated_delay::{Lfo, ModulatedDelay};
pub use reverb::reverb;

use crate::params::ParameterStore;

/// A stateful block processor.
pub trait Chain {
    /// Processes `input` into `output`. Both blocks are expected to have the same
    /// length. If they don't, the common prefix is processed and any remaining
    /// output samples are set to 0.
    fn process(&mut self, input: &[f32], output: &mut [f32], params: &ParameterStore);

    /// Clears all stage state, as if no samples had been processed.
    fn reset(&mut self);
}

/// Applies `f` to every input sample, writing the results to `output`.
#[inline]
pub(crate) fn map_block<F>(input: &[f32], output: &mut [f32], mut f: F)
where
    F: FnMut(f32) -> f32,
{
    for (output, input) in output.iter_mut().zip(input.iter()) {
        *output = f(*input);
    }
    if output.len() > input.len() {
        for output in output[input.len()..].iter_mut() {
            *output = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_block_length_mismatch() {
        let input = [0.1, 0.2, 0.3];

        let mut longer = [1.0; 5];
        map_block(&input, &mut longer, |x| 2.0 * x);
        assert_eq!(longer, [0.2, 0.4, 0.6, 0.0, 0.0]);

        let mut shorter = [1.0; 2];
        map_block(&input, &mut shorter, |x| 2.0 * x);
        assert_eq!(shorter, [0.2, 0.4]);
    }
}
