//! Block level helpers for `[f32]`.

use micromath::F32Ext;

/// Block level helpers for `[f32]`.
pub trait F32ArrayExt {
    /// Returns the maximum absolute sample value, 0 for an empty block.
    fn peak_level(&self) -> f32;
    /// Limits every sample to [-1, 1]. Returns the number of samples that were clipped.
    fn clamp_to_unit(&mut self) -> usize;
}

impl F32ArrayExt for [f32] {
    fn peak_level(&self) -> f32 {
        self.iter().fold(0.0, |max, sample| {
            let value = F32Ext::abs(*sample);
            if value > max {
                value
            } else {
                max
            }
        })
    }

    fn clamp_to_unit(&mut self) -> usize {
        let mut clipped = 0;
        for sample in self.iter_mut() {
            if *sample > 1.0 {
                *sample = 1.0;
                clipped += 1;
            } else if *sample < -1.0 {
                *sample = -1.0;
                clipped += 1;
            }
        }
        clipped
    }
}
