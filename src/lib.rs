//! A real time guitar rig built from small, allocation free DSP building blocks.
//!
//! Two pipelines share the primitives in this crate:
//! * An effect chain ([fx]) that turns an input block into an output block of the
//! same length, either the clean amp (noise gate, low pass, high pass, gain) or the
//! effects rack (distortion, delay, flanger, chorus, reverb).
//! * A tuner ([tuner]) that collects samples into a fixed size window, locates the
//! dominant FFT bin of every filled window and maps its frequency to the closest
//! note and octave.
//!
//! Tunable values live in a lock free [params::ParameterStore] that the audio callback
//! reads once per block while a control thread writes to it.
//!
//! Features
//! * No allocations after construction, suitable for use in real time audio callbacks.
//! * `no_std` compatible (requires `alloc`).
//!
//! # Examples
//!
//! ```
//! use micro_rig::fx::{Chain, FxConfig, FxRack};
//! use micro_rig::params::ParameterStore;
//!
//! let sample_rate = 44100.0;
//! let params = ParameterStore::fx_rack();
//! let mut rack = FxRack::new(sample_rate, FxConfig::default());
//!
//! let input = [0.25_f32; 256];
//! let mut output = [0.0_f32; 256];
//! rack.process(&input, &mut output, &params);
//! assert!(output.iter().all(|s| s.abs() <= 1.0));
//! ```
//!
//! ```
//! use micro_rig::tuner::Detector;
//!
//! let sample_rate = 44100.0;
//! let window_size = 2048;
//! let mut detector = Detector::new(sample_rate, window_size);
//! let chunk: Vec<f32> = (0..window_size)
//!     .map(|i| (2.0 * core::f32::consts::PI * 440.0 * (i as f32) / sample_rate).sin())
//!     .collect();
//! detector.process(&chunk, |result| {
//!     assert_eq!(result.note.name(), "A");
//!     assert_eq!(result.octave, 4);
//! });
//! ```

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod capture;
pub mod common;
pub mod control;
pub mod fx;
pub mod mixer;
pub mod params;
pub mod tuner;
