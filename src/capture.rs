//! Capturing processed blocks while a recording flag is set.
//!
//! The audio callback owns the [Recorder] and is the only writer to its sink. A
//! control thread holds a clone of the [RecordFlag] and may stop the recording once.
//! The recorder reads the flag once per block, so blocks are never split: a block is
//! either captured entirely or not at all.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

/// Somewhere to append captured samples.
pub trait CaptureSink {
    /// Appends as much of `block` as possible, returning the number of samples accepted.
    /// Implementations used from an audio callback must not block or allocate.
    fn append(&mut self, block: &[f32]) -> usize;
}

/// An unbounded in-memory capture. Allocates as it grows, so it is meant for offline
/// processing and tests rather than audio callbacks.
impl CaptureSink for Vec<f32> {
    fn append(&mut self, block: &[f32]) -> usize {
        self.extend_from_slice(block);
        block.len()
    }
}

/// A shared flag telling a [Recorder] whether to keep capturing.
#[derive(Clone, Debug)]
pub struct RecordFlag(Arc<AtomicBool>);

impl RecordFlag {
    pub fn new(recording: bool) -> Self {
        RecordFlag(Arc::new(AtomicBool::new(recording)))
    }

    pub fn is_recording(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Stops the recording. Has no effect if already stopped.
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Appends processed blocks to a [CaptureSink] until its [RecordFlag] is cleared.
pub struct Recorder<S: CaptureSink> {
    sink: S,
    flag: RecordFlag,
    stopped: bool,
    recorded_samples: usize,
    dropped_samples: usize,
}

impl<S: CaptureSink> Recorder<S> {
    pub fn new(sink: S, flag: RecordFlag) -> Self {
        Recorder {
            sink,
            flag,
            stopped: false,
            recorded_samples: 0,
            dropped_samples: 0,
        }
    }

    /// Captures `block` if recording. Once the flag has been observed cleared, the
    /// recorder stays stopped. Returns true if the block was passed to the sink.
    pub fn record(&mut self, block: &[f32]) -> bool {
        if self.stopped {
            return false;
        }
        if !self.flag.is_recording() {
            self.stopped = true;
            return false;
        }
        let accepted = self.sink.append(block);
        self.recorded_samples += accepted;
        self.dropped_samples += block.len() - accepted.min(block.len());
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The number of samples the sink accepted.
    pub fn recorded_samples(&self) -> usize {
        self.recorded_samples
    }

    /// The number of samples the sink could not accept.
    pub fn dropped_samples(&self) -> usize {
        self.dropped_samples
    }

    pub fn flag(&self) -> &RecordFlag {
        &self.flag
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
