use alloc::{boxed::Box, vec};

/// Collects incoming samples into a fixed size ring buffer and hands the
/// whole buffer to a handler every time the write cursor wraps around.
///
/// Consecutive windows do not overlap. Since the handler is only invoked when
/// the cursor is back at index 0, the buffer passed to it is in chronological
/// order, oldest sample first.
pub struct WindowProcessor {
    window: Box<[f32]>,
    // Always less than window.len()
    write_index: usize,
    filled_window_count: usize,
}

impl WindowProcessor {
    pub fn new(window_size: usize) -> Self {
        if window_size == 0 {
            panic!("Window size must be greater than 0")
        }
        WindowProcessor {
            window: vec![0.; window_size].into_boxed_slice(),
            write_index: 0,
            filled_window_count: 0,
        }
    }

    /// Discards any partially collected window.
    pub fn reset(&mut self) {
        self.write_index = 0;
        for value in self.window.iter_mut() {
            *value = 0.
        }
    }

    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// The index the next sample will be written to.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// The number of windows handed to a handler so far.
    pub fn filled_window_count(&self) -> usize {
        self.filled_window_count
    }

    pub fn process<F>(&mut self, buffer: &[f32], mut handler: F)
    where
        F: FnMut(&[f32]),
    {
        let window_size = self.window.len();
        for input in buffer.iter() {
            self.window[self.write_index] = *input;
            self.write_index = (self.write_index + 1) % window_size;
            if self.write_index == 0 {
                self.filled_window_count += 1;
                handler(&self.window);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WindowProcessor;
    use crate::alloc::vec::Vec;

    #[test]
    fn test_window_processor() {
        const WINDOW_SIZE: usize = 16;
        const BUFFER_SIZE: usize = 5 * WINDOW_SIZE;
        let mut processor = WindowProcessor::new(WINDOW_SIZE);
        let mut buffer = [0.; BUFFER_SIZE];
        for (index, value) in buffer.iter_mut().enumerate() {
            *value = index as f32;
        }

        // Feed the buffer in uneven chunks. Every window must start
        // where the previous one ended.
        let mut first_values: Vec<f32> = Vec::new();
        let mut offset = 0;
        for chunk_size in [1, 7, 13, 20, 39].iter() {
            let chunk = &buffer[offset..offset + chunk_size];
            processor.process(chunk, |window| {
                assert_eq!(window.len(), WINDOW_SIZE);
                for pair in window.windows(2) {
                    assert_eq!(pair[1], pair[0] + 1.0);
                }
                first_values.push(window[0]);
            });
            offset += chunk_size;
        }

        assert_eq!(offset, BUFFER_SIZE);
        assert_eq!(first_values, [0., 16., 32., 48., 64.]);
        assert_eq!(processor.filled_window_count(), 5);
        assert_eq!(processor.write_index(), 0);
    }

    #[test]
    fn test_partial_window() {
        let mut processor = WindowProcessor::new(8);
        let mut call_count = 0;
        processor.process(&[1.0; 7], |_| call_count += 1);
        assert_eq!(call_count, 0);
        assert_eq!(processor.write_index(), 7);
        processor.process(&[1.0; 1], |_| call_count += 1);
        assert_eq!(call_count, 1);

        processor.process(&[1.0; 3], |_| call_count += 1);
        processor.reset();
        assert_eq!(processor.write_index(), 0);
        processor.process(&[1.0; 7], |_| call_count += 1);
        assert_eq!(call_count, 1);
    }

    #[test]
    #[should_panic]
    fn test_zero_window_size() {
        WindowProcessor::new(0);
    }
}
