//! [Window functions](https://en.wikipedia.org/wiki/Window_function) applied to
//! analysis windows before the FFT.

use core::f32::consts::PI;
use micromath::F32Ext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowFunction {
    /// Leaves the window untouched. The frame boundary is the only window.
    Rectangular,
    /// <https://en.wikipedia.org/wiki/Window_function#Hann_and_Hamming_windows>
    Hann,
}

impl Default for WindowFunction {
    fn default() -> Self {
        WindowFunction::Rectangular
    }
}

/// Performs point-wise multiplication of a buffer and a window function of a given type.
pub fn apply_window_function(window_function: WindowFunction, buffer: &mut [f32]) {
    match window_function {
        WindowFunction::Rectangular => {}
        WindowFunction::Hann => hann_window(buffer),
    }
}

fn hann_window(buffer: &mut [f32]) {
    let len = buffer.len();
    if len < 2 {
        return;
    }
    let dx = 2. * PI / ((len - 1) as f32);
    for (i, value) in buffer.iter_mut().enumerate() {
        let window_value = 0.5 * (1. - F32Ext::cos(dx * (i as f32)));
        *value *= window_value;
    }
}
