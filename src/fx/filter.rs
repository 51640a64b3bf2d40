//! One pole low pass and high pass filters.

/// The low pass coefficient used by the clean amp.
pub const DEFAULT_LOW_PASS_ALPHA: f32 = 0.1;
/// The high pass coefficient used by the clean amp.
pub const DEFAULT_HIGH_PASS_ALPHA: f32 = 0.9;

/// One pole low pass step: `alpha * input + (1 - alpha) * previous`.
#[inline]
pub fn low_pass(input: f32, previous: f32, alpha: f32) -> f32 {
    alpha * input + (1.0 - alpha) * previous
}

/// High pass step: `alpha * (previous + input - previous)`.
///
/// The previous value cancels out, leaving `alpha * input` up to rounding.
/// The expression is evaluated in this order so results match the reference
/// amp bit for bit.
#[inline]
pub fn high_pass(input: f32, previous: f32, alpha: f32) -> f32 {
    alpha * (previous + input - previous)
}

/// How the low pass and high pass of a [ToneFilter] keep their history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Each filter remembers its own previous output.
    Independent,
    /// Both filters read a single previous value, which is set to the high
    /// pass output after every sample. Reproduces the reference amp.
    Coupled,
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::Independent
    }
}

/// A low pass followed by a high pass.
pub struct ToneFilter {
    mode: FilterMode,
    low_pass_alpha: f32,
    high_pass_alpha: f32,
    // In coupled mode, the shared previous value.
    low_pass_previous: f32,
    high_pass_previous: f32,
}

impl ToneFilter {
    pub fn new(mode: FilterMode, low_pass_alpha: f32, high_pass_alpha: f32) -> Self {
        ToneFilter {
            mode,
            low_pass_alpha,
            high_pass_alpha,
            low_pass_previous: 0.0,
            high_pass_previous: 0.0,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.low_pass_previous = 0.0;
        self.high_pass_previous = 0.0;
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        match self.mode {
            FilterMode::Coupled => {
                let previous = self.low_pass_previous;
                let low = low_pass(sample, previous, self.low_pass_alpha);
                let high = high_pass(low, previous, self.high_pass_alpha);
                self.low_pass_previous = high;
                high
            }
            FilterMode::Independent => {
                let low = low_pass(sample, self.low_pass_previous, self.low_pass_alpha);
                self.low_pass_previous = low;
                let high = high_pass(low, self.high_pass_previous, self.high_pass_alpha);
                self.high_pass_previous = high;
                high
            }
        }
    }
}

impl Default for ToneFilter {
    fn default() -> Self {
        ToneFilter::new(
            FilterMode::default(),
            DEFAULT_LOW_PASS_ALPHA,
            DEFAULT_HIGH_PASS_ALPHA,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_pass_step() {
        assert_eq!(low_pass(1.0, 0.0, 0.1), 0.1);
        assert_eq!(low_pass(0.0, 1.0, 0.1), 0.9);
        assert_eq!(low_pass(0.5, 0.5, 0.3), 0.5);
    }

    #[test]
    fn test_high_pass_scales_input() {
        for previous in [-0.5_f32, 0.0, 0.25].iter() {
            let output = high_pass(0.5, *previous, 0.9);
            assert!((output - 0.45).abs() < 1e-6);
        }
    }

    #[test]
    fn test_coupled_matches_reference() {
        let input = [0.3_f32, -0.2, 0.8, 0.1, 0.0, -0.7, 0.4];
        let mut filter = ToneFilter::new(FilterMode::Coupled, 0.1, 0.9);
        let mut previous = 0.0_f32;
        for sample in input.iter() {
            let low = 0.1 * sample + (1.0 - 0.1) * previous;
            let expected = 0.9 * (previous + low - previous);
            previous = expected;
            assert_eq!(filter.process(*sample), expected);
        }
    }

    #[test]
    fn test_dc_response() {
        // Independent: the low pass settles on the input, the high pass scales it.
        let mut independent = ToneFilter::new(FilterMode::Independent, 0.1, 0.9);
        // Coupled: y = 0.9 * (0.1 * x + 0.9 * y), so y = 0.09 / 0.19 * x.
        let mut coupled = ToneFilter::new(FilterMode::Coupled, 0.1, 0.9);
        let mut independent_output = 0.0;
        let mut coupled_output = 0.0;
        for _ in 0..1000 {
            independent_output = independent.process(1.0);
            coupled_output = coupled.process(1.0);
        }
        assert!((independent_output - 0.9).abs() < 1e-4);
        assert!((coupled_output - 0.09 / 0.19).abs() < 1e-4);
    }

    #[test]
    fn test_reset() {
        let mut filter = ToneFilter::default();
        filter.process(1.0);
        filter.reset();
        assert_eq!(filter.process(0.0), 0.0);
    }
}
