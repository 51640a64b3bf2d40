use crate::alloc::boxed::Box;
use crate::alloc::vec;
use crate::common::{
    apply_window_function, is_supported_fft_size, real_fft, WindowFunction, WindowProcessor,
};
use crate::tuner::result::{peak_bin, DetectionResult};
use tracing::debug;

/// The window size used by the tuner programs.
pub const DEFAULT_WINDOW_SIZE: usize = 2048;

/// Returns true if `window_size` can be used to create a [Detector], i.e if it is
/// a power of two from 8 to 4096.
pub fn is_supported_window_size(window_size: usize) -> bool {
    is_supported_fft_size(window_size)
}

/// * Collects input samples into consecutive, non overlapping windows
/// * Estimates the dominant frequency of each newly filled window
/// * Maps the frequency to the closest note
pub struct Detector {
    /// The audio sample rate in Hz.
    sample_rate: f32,
    window_function: WindowFunction,
    window_processor: WindowProcessor,
    /// A copy of the most recent window, transformed in place.
    fft_buffer: Box<[f32]>,
    /// Bin magnitudes of the most recent window.
    magnitudes: Box<[f32]>,
    result: DetectionResult,
}

impl Detector {
    pub fn new(sample_rate: f32, window_size: usize) -> Self {
        Detector::from_options(sample_rate, window_size, WindowFunction::Rectangular)
    }

    pub fn from_options(
        sample_rate: f32,
        window_size: usize,
        window_function: WindowFunction,
    ) -> Self {
        if !is_supported_window_size(window_size) {
            panic!(
                "Window size must be a power of two from 8 to 4096, got {}",
                window_size
            )
        }
        if !(sample_rate > 0.0) {
            panic!("Sample rate must be greater than 0")
        }
        debug!(
            "Tuner: {} Hz, window size {}, {:?} window, {} Hz per bin",
            sample_rate,
            window_size,
            window_function,
            sample_rate / (window_size as f32)
        );

        Detector {
            sample_rate,
            window_function,
            window_processor: WindowProcessor::new(window_size),
            fft_buffer: vec![0.0; window_size].into_boxed_slice(),
            magnitudes: vec![0.0; window_size / 2].into_boxed_slice(),
            result: DetectionResult::default(),
        }
    }

    /// Accumulates `samples`, invoking `result_handler` once for every window that
    /// fills up. Returns true if at least one window was analyzed.
    pub fn process<F>(&mut self, samples: &[f32], mut result_handler: F) -> bool
    where
        F: FnMut(&DetectionResult),
    {
        let sample_rate = self.sample_rate;
        let window_function = self.window_function;
        let fft_buffer = &mut self.fft_buffer;
        let magnitudes = &mut self.magnitudes;
        let result = &mut self.result;
        let window_count_before = self.window_processor.filled_window_count();

        self.window_processor.process(samples, |window| {
            fft_buffer.copy_from_slice(window);
            apply_window_function(window_function, fft_buffer);
            let spectrum = real_fft(fft_buffer);
            let (bin, magnitude) = peak_bin(spectrum, magnitudes);
            *result = DetectionResult::from_peak(bin, magnitude, sample_rate, window.len());
            result_handler(result);
        });

        self.window_processor.filled_window_count() > window_count_before
    }

    /// Returns the most recently computed result.
    pub fn result(&self) -> &DetectionResult {
        &self.result
    }

    /// Returns the bin magnitudes of the most recently analyzed window.
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Returns the number of analyzed windows since the
    /// detector was created.
    pub fn processed_window_count(&self) -> usize {
        self.window_processor.filled_window_count()
    }

    /// Returns the fixed number of samples in a window.
    pub fn window_size(&self) -> usize {
        self.window_processor.window_size()
    }

    /// The width of a frequency bin in Hz.
    pub fn bin_width(&self) -> f32 {
        self.sample_rate / (self.window_size() as f32)
    }

    pub fn window_function(&self) -> WindowFunction {
        self.window_function
    }

    /// Returns the current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Discards the partially collected window.
    pub fn reset(&mut self) {
        self.window_processor.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::vec::Vec;
    use crate::common::Note;

    fn generate_sine(sample_rate: f32, frequency: f32, sample_count: usize) -> Vec<f32> {
        let mut window: Vec<f32> = vec![0.0; sample_count];
        for i in 0..sample_count {
            let sine_value =
                (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin();
            window[i] = sine_value;
        }
        return window;
    }

    #[test]
    fn test_sine_detection() {
        let sample_rate: f32 = 44100.0;
        let window_size = 2048;
        let bin_width = sample_rate / (window_size as f32);
        // Frequencies strictly between bin 1 and bin N/2 - 1.
        let frequencies = [43.0_f32, 82.41, 110.0, 196.0, 440.0, 1000.0, 5000.0, 20000.0];
        for frequency in frequencies.iter() {
            let window = generate_sine(sample_rate, *frequency, window_size);
            let mut detector = Detector::new(sample_rate, window_size);
            let mut result_count = 0;
            detector.process(&window[..], |result: &DetectionResult| {
                assert!((frequency - result.frequency).abs() <= bin_width);
                result_count += 1;
            });
            assert_eq!(result_count, 1);
        }
    }

    #[test]
    fn test_hann_window_detection() {
        let sample_rate: f32 = 44100.0;
        let window_size = 4096;
        let bin_width = sample_rate / (window_size as f32);
        let frequency = 329.63;
        let window = generate_sine(sample_rate, frequency, window_size);
        let mut detector = Detector::from_options(sample_rate, window_size, WindowFunction::Hann);
        assert_eq!(detector.window_function(), WindowFunction::Hann);
        assert!(detector.process(&window[..], |result| {
            assert!((frequency - result.frequency).abs() <= bin_width);
            assert_eq!((result.note, result.octave), (Note::E, 4));
        }));
    }

    #[test]
    fn test_reference_pitch() {
        let sample_rate: f32 = 44100.0;
        let window = generate_sine(sample_rate, 440.0, 2048);
        let mut detector = Detector::new(sample_rate, 2048);
        detector.process(&window[..], |_| {});
        let result = detector.result();
        assert_eq!(result.bin, 20);
        assert_eq!((result.note, result.octave), (Note::A, 4));
        assert_eq!(detector.magnitudes().len(), 1024);
    }

    #[test]
    fn test_silence() {
        let mut detector = Detector::new(44100.0, 1024);
        let silence = [0.0_f32; 1024];
        detector.process(&silence, |result| {
            assert!(result.is_silent());
            assert_eq!(result.frequency, 0.0);
            assert_eq!((result.note, result.octave), (Note::C, 0));
        });
        assert_eq!(detector.processed_window_count(), 1);
    }

    #[test]
    fn test_dc_is_ignored() {
        // A constant offset on top of a tone does not hide the tone.
        let sample_rate: f32 = 8000.0;
        let window_size = 512;
        let frequency = 500.0;
        let window: Vec<f32> = generate_sine(sample_rate, frequency, window_size)
            .iter()
            .map(|s| 0.5 * s + 0.9)
            .collect();
        let mut detector = Detector::new(sample_rate, window_size);
        detector.process(&window, |result| {
            assert_eq!(result.bin, 32);
        });
    }

    #[test]
    fn test_windowing() {
        // Results are reported once per filled window, regardless of how the
        // input is chunked, and windows do not overlap.
        let sample_rate: f32 = 44100.0;
        let window_size = 256;
        let signal = generate_sine(sample_rate, 1000.0, 10 * window_size + 100);
        let mut detector = Detector::new(sample_rate, window_size);
        let mut result_count = 0;
        let mut any_processed = false;
        for chunk in signal.chunks(100) {
            any_processed |= detector.process(chunk, |_| result_count += 1);
        }
        assert!(any_processed);
        assert_eq!(result_count, 10);
        assert_eq!(detector.processed_window_count(), 10);

        // 100 samples are already collected towards the next window.
        assert!(!detector.process(&signal[..window_size - 100 - 1], |_| {}));
        assert!(detector.process(&signal[..1], |_| {}));

        detector.reset();
        assert!(!detector.process(&signal[..window_size - 1], |_| {}));
        assert_eq!(detector.processed_window_count(), 11);
    }

    #[test]
    fn test_supported_window_sizes() {
        assert!(is_supported_window_size(2048));
        assert!(!is_supported_window_size(2000));
        assert!(!is_supported_window_size(8192));
    }

    #[test]
    #[should_panic]
    fn test_non_power_of_two_window_size() {
        Detector::new(44100.0, 1000);
    }

    #[test]
    #[should_panic]
    fn test_zero_window_size() {
        Detector::new(44100.0, 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_sample_rate() {
        Detector::new(0.0, 1024);
    }
}
