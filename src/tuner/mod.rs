//! FFT based tuner.
//!
//! Incoming samples are collected into a window of `N` samples. Each time the window
//! fills up, it is transformed using a real FFT, the bin with the largest magnitude
//! (ignoring DC) is converted to a frequency and that frequency is mapped to the closest
//! note and octave. Windows do not overlap and, by default, no window function is
//! applied, so the frequency resolution is `sample_rate / N`.
//!
//! # Examples
//! ```
//! use micro_rig::common::Note;
//! use micro_rig::tuner::Detector;
//!
//! // A low E string, slightly flat.
//! let sample_rate = 44100.0;
//! let frequency = 81.0;
//! let window_size = 4096;
//! let chunk: Vec<f32> = (0..window_size)
//!     .map(|i| (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut detector = Detector::new(sample_rate, window_size);
//! detector.process(&chunk, |result| {
//!     let bin_width = detector_bin_width(sample_rate, window_size);
//!     assert!((result.frequency - frequency).abs() <= bin_width);
//!     assert_eq!((result.note, result.octave), (Note::E, 2));
//! });
//! assert_eq!(detector.processed_window_count(), 1);
//!
//! fn detector_bin_width(sample_rate: f32, window_size: usize) -> f32 {
//!     sample_rate / (window_size as f32)
//! }
//! ```

mod detector;
mod result;

pub use detector::{is_supported_window_size, Detector, DEFAULT_WINDOW_SIZE};
pub use result::{peak_bin, DetectionResult};
