use core::f32::consts::PI;
use micromath::F32Ext;

use super::delay::DelayLine;

const TWO_PI: f32 = 2.0 * PI;

/// A sine low frequency oscillator.
pub struct Lfo {
    /// Current phase in radians, in [0, 2π).
    phase: f32,
    /// Phase increment per sample in radians.
    increment: f32,
}

impl Lfo {
    pub fn new(sample_rate: f32, rate_hz: f32) -> Self {
        Lfo {
            phase: 0.0,
            increment: TWO_PI * rate_hz / sample_rate,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// The oscillator value mapped from [-1, 1] to [0, 1].
    #[inline]
    pub fn unipolar(&self) -> f32 {
        (F32Ext::sin(self.phase) + 1.0) * 0.5
    }

    #[inline]
    pub fn advance(&mut self) {
        self.phase += self.increment;
        if self.phase >= TWO_PI {
            self.phase -= TWO_PI;
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// A delay line whose read position trails the write cursor by an amount that
/// an [Lfo] sweeps between 0 and `depth_samples`. Used for flanging and chorus.
pub struct ModulatedDelay {
    line: DelayLine,
    lfo: Lfo,
    depth_samples: usize,
}

impl ModulatedDelay {
    /// Creates a modulated delay. The capacity is raised to `depth_samples + 1`
    /// if needed, so reads never reach samples that have not been written yet.
    pub fn new(sample_rate: f32, capacity: usize, depth_ms: f32, rate_hz: f32) -> Self {
        let depth_samples = (depth_ms * sample_rate / 1000.0) as usize;
        ModulatedDelay {
            line: DelayLine::new(capacity.max(depth_samples + 1)),
            lfo: Lfo::new(sample_rate, rate_hz),
            depth_samples,
        }
    }

    pub fn depth_samples(&self) -> usize {
        self.depth_samples
    }

    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }

    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    pub fn reset(&mut self) {
        self.line.clear();
        self.lfo.reset();
    }

    /// The current distance between the write cursor and the read position.
    #[inline]
    pub fn lfo_offset(&self) -> usize {
        let offset = F32Ext::round(self.lfo.unipolar() * (self.depth_samples as f32));
        (offset.max(0.0) as usize).min(self.depth_samples)
    }

    /// Returns `sample` plus the modulated delayed sample scaled by `mix`.
    #[inline]
    pub fn process(&mut self, sample: f32, mix: f32) -> f32 {
        let delayed = self.line.read(self.lfo_offset());
        self.line.write(sample);
        self.lfo.advance();
        sample + delayed * mix
    }
}
