use alloc::{boxed::Box, vec};

/// A fixed capacity circular buffer with a write cursor.
///
/// Reading at offset `n`, for `n` in `1..capacity`, returns the sample written `n`
/// writes ago. Reading at offset 0 returns the sample written `capacity` writes ago,
/// i.e the sample about to be overwritten.
pub struct DelayLine {
    buffer: Box<[f32]>,
    // Always less than buffer.len()
    write_index: usize,
}

impl DelayLine {
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("Delay line capacity must be greater than 0")
        }
        DelayLine {
            buffer: vec![0.0; capacity].into_boxed_slice(),
            write_index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Reads the sample `offset` positions behind the write cursor, wrapping around
    /// the start of the buffer.
    #[inline]
    pub fn read(&self, offset: usize) -> f32 {
        let capacity = self.buffer.len();
        let index = (self.write_index + capacity - offset % capacity) % capacity;
        self.buffer[index]
    }

    /// Stores a sample at the write cursor and advances the cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_index] = sample;
        self.write_index = (self.write_index + 1) % self.buffer.len();
    }

    pub fn clear(&mut self) {
        for value in self.buffer.iter_mut() {
            *value = 0.0;
        }
        self.write_index = 0;
    }
}

/// An echo with a delay time equal to the capacity of its delay line.
pub struct Delay {
    line: DelayLine,
}

impl Delay {
    /// Creates a delay of `max_delay_samples` samples.
    pub fn new(max_delay_samples: usize) -> Self {
        Delay {
            line: DelayLine::new(max_delay_samples),
        }
    }

    pub fn max_delay_samples(&self) -> usize {
        self.line.capacity()
    }

    pub fn reset(&mut self) {
        self.line.clear()
    }

    /// Returns `sample` plus the delayed sample scaled by `mix`.
    #[inline]
    pub fn process(&mut self, sample: f32, mix: f32) -> f32 {
        let delayed = self.line.read(0);
        self.line.write(sample);
        sample + delayed * mix
    }
}
