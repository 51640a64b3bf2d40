//! Mixing two equally formatted sample buffers at equal levels.

use alloc::{vec, vec::Vec};

/// The level each input is scaled by before summing.
pub const MIX_LEVEL: f32 = 0.5;

/// Writes `0.5 * first[i] + 0.5 * second[i]` to `output[i]` for every index present
/// in all three buffers. Returns the number of samples written.
///
/// Interleaved multi channel buffers can be mixed directly, provided both inputs
/// have the same channel count.
pub fn mix_into(first: &[f32], second: &[f32], output: &mut [f32]) -> usize {
    let mut count = 0;
    for ((output, a), b) in output.iter_mut().zip(first.iter()).zip(second.iter()) {
        *output = (a * MIX_LEVEL) + (b * MIX_LEVEL);
        count += 1;
    }
    count
}

/// Mixes two buffers over their common length.
pub fn mix(first: &[f32], second: &[f32]) -> Vec<f32> {
    let mut output = vec![0.0; first.len().min(second.len())];
    mix_into(first, second, &mut output);
    output
}

/// Plays back a buffer one block at a time.
pub struct Playback {
    samples: Vec<f32>,
    position: usize,
}

impl Playback {
    pub fn new(samples: Vec<f32>) -> Self {
        Playback {
            samples,
            position: 0,
        }
    }

    /// Copies the next samples to `output`, padding with silence past the end.
    /// Returns false once every sample has been played.
    pub fn fill(&mut self, output: &mut [f32]) -> bool {
        let remaining = &self.samples[self.position..];
        let count = remaining.len().min(output.len());
        output[..count].copy_from_slice(&remaining[..count]);
        for sample in output[count..].iter_mut() {
            *sample = 0.0;
        }
        self.position += count;
        !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.samples.len()
    }

    /// The number of samples played so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
