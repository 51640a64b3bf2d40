use micromath::F32Ext;

use crate::common::{cents_between, closest_note, Note};

/// The outcome of analyzing one window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DetectionResult {
    /// The estimated frequency in Hz, `bin * sample_rate / window_size`.
    pub frequency: f32,
    /// The index of the bin with the largest magnitude. 0 if every bin above DC is silent.
    pub bin: usize,
    /// The magnitude of the peak bin.
    pub magnitude: f32,
    /// The note closest to `frequency`.
    pub note: Note,
    /// The octave of `note`, 0 to 8.
    pub octave: u8,
    /// The frequency of `note` in `octave`.
    pub target_frequency: f32,
    /// The distance from `target_frequency` to `frequency` in cents.
    pub cents: f32,
}

impl DetectionResult {
    pub fn from_peak(bin: usize, magnitude: f32, sample_rate: f32, window_size: usize) -> Self {
        let frequency = (bin as f32) * sample_rate / (window_size as f32);
        let (note, octave) = closest_note(frequency);
        let target_frequency = note.frequency(octave);
        DetectionResult {
            frequency,
            bin,
            magnitude,
            note,
            octave,
            target_frequency,
            cents: cents_between(frequency, target_frequency),
        }
    }

    /// True if no bin above DC had any energy.
    pub fn is_silent(&self) -> bool {
        self.bin == 0
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        DetectionResult::from_peak(0, 0.0, 1.0, 1)
    }
}

/// Finds the bin with the largest magnitude among bins `1..spectrum.len()`, writing
/// every bin magnitude to `magnitudes`. Returns `(bin, magnitude)`.
///
/// The search starts from bin 0 with magnitude 0 and only moves on a strictly larger
/// magnitude, so ties go to the lowest bin and an all zero spectrum yields bin 0.
pub fn peak_bin(spectrum: &[microfft::Complex32], magnitudes: &mut [f32]) -> (usize, f32) {
    let mut peak_index = 0;
    let mut peak_norm_sqr = 0.0;
    for (index, z) in spectrum.iter().enumerate() {
        let norm_sqr = if index == 0 {
            // The imaginary part of the DC bin holds the Nyquist coefficient.
            z.re * z.re
        } else {
            z.norm_sqr()
        };
        if let Some(magnitude) = magnitudes.get_mut(index) {
            *magnitude = magnitude_from_norm_sqr(norm_sqr);
        }
        if index > 0 && norm_sqr > peak_norm_sqr {
            peak_norm_sqr = norm_sqr;
            peak_index = index;
        }
    }
    (peak_index, magnitude_from_norm_sqr(peak_norm_sqr))
}

// micromath's sqrt(0) is a tiny positive number.
fn magnitude_from_norm_sqr(norm_sqr: f32) -> f32 {
    if norm_sqr > 0.0 {
        F32Ext::sqrt(norm_sqr)
    } else {
        0.0
    }
}
