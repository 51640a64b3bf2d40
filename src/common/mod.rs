//! Common algorithms and utilities.

mod f32_array_ext;
mod fft;
mod note;
mod window_function;
mod window_processor;

pub use f32_array_ext::F32ArrayExt;
pub use fft::{is_supported_fft_size, real_fft};
pub use note::{closest_note, cents_between, Note, NOTE_TABLE, OCTAVE_COUNT};
pub use window_function::{apply_window_function, WindowFunction};
pub use window_processor::WindowProcessor;
