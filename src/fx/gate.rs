use micromath::F32Ext;

/// A noise gate with instant attack and exponential release.
///
/// The gate opens fully as soon as a sample exceeds the threshold and
/// otherwise closes by multiplying its level by `release` every sample.
pub struct NoiseGate {
    /// The current gain applied to incoming samples, in [0, 1].
    level: f32,
    /// Per sample decay factor, expected to be in (0, 1).
    release: f32,
}

/// The release factor used by [NoiseGate::default].
pub const DEFAULT_RELEASE: f32 = 0.99;

impl NoiseGate {
    /// Creates a closed gate. A `release` of 1 or more never closes the gate
    /// once opened, 0 or less closes it on the first quiet sample.
    pub fn new(release: f32) -> Self {
        NoiseGate {
            level: 0.0,
            release,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn release(&self) -> f32 {
        self.release
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    /// Gates a single sample. A threshold of 0 or less disables the gate.
    #[inline]
    pub fn process(&mut self, sample: f32, threshold: f32) -> f32 {
        if threshold <= 0.0 {
            self.level = 1.0;
            return sample;
        }
        if F32Ext::abs(sample) > threshold {
            self.level = 1.0;
        } else {
            self.level = (self.level * self.release).max(0.0).min(1.0);
        }
        sample * self.level
    }
}

impl Default for NoiseGate {
    fn default() -> Self {
        NoiseGate::new(DEFAULT_RELEASE)
    }
}
