//! The audio thread side of the programs.

use std::sync::Arc;

use micro_rig::capture::Recorder;
use micro_rig::common::F32ArrayExt;
use micro_rig::fx::Chain;
use micro_rig::mixer::Playback;
use micro_rig::params::ParameterStore;
use micro_rig::tuner::{DetectionResult, Detector};

use crate::audio::AudioProcessor;
use crate::wav::RingCapture;

/// Sent to the main thread after every processed block.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Meter {
    /// The peak level of the output block.
    pub peak: f32,
    /// Total samples captured so far.
    pub recorded_samples: usize,
    /// Total samples the capture queue could not accept.
    pub dropped_samples: usize,
    pub recording: bool,
}

/// Runs an effect chain, optionally capturing its output.
pub struct AmpProcessor<C: Chain> {
    chain: C,
    params: Arc<ParameterStore>,
    recorder: Option<Recorder<RingCapture>>,
}

impl<C: Chain> AmpProcessor<C> {
    pub fn new(
        chain: C,
        params: Arc<ParameterStore>,
        recorder: Option<Recorder<RingCapture>>,
    ) -> Self {
        AmpProcessor {
            chain,
            params,
            recorder,
        }
    }
}

impl<C: Chain + Send + 'static> AudioProcessor<Meter> for AmpProcessor<C> {
    fn process(
        &mut self,
        in_buffer: &[f32],
        out_buffer: &mut [f32],
        to_main_thread: &mut rtrb::Producer<Meter>,
    ) -> bool {
        self.chain.process(in_buffer, out_buffer, &self.params);

        let mut meter = Meter {
            peak: out_buffer.peak_level(),
            ..Meter::default()
        };
        if let Some(recorder) = &mut self.recorder {
            meter.recording = recorder.record(out_buffer);
            meter.recorded_samples = recorder.recorded_samples();
            meter.dropped_samples = recorder.dropped_samples();
        }
        // The main thread only shows the latest meter, so a full queue loses nothing.
        let _ = to_main_thread.push(meter);
        true
    }
}

/// Runs the tuner on the input and reports a result for every analyzed window.
pub struct TunerProcessor {
    detector: Detector,
}

impl TunerProcessor {
    pub fn new(detector: Detector) -> Self {
        TunerProcessor { detector }
    }
}

impl AudioProcessor<DetectionResult> for TunerProcessor {
    fn process(
        &mut self,
        in_buffer: &[f32],
        _: &mut [f32],
        to_main_thread: &mut rtrb::Producer<DetectionResult>,
    ) -> bool {
        self.detector.process(in_buffer, |result| {
            let _ = to_main_thread.push(*result);
        });
        true
    }
}

/// Plays a buffer of interleaved samples once, then stops the stream.
pub struct PlaybackProcessor {
    playback: Playback,
}

impl PlaybackProcessor {
    pub fn new(samples: Vec<f32>) -> Self {
        PlaybackProcessor {
            playback: Playback::new(samples),
        }
    }
}

impl AudioProcessor<usize> for PlaybackProcessor {
    fn process(
        &mut self,
        _: &[f32],
        out_buffer: &mut [f32],
        to_main_thread: &mut rtrb::Producer<usize>,
    ) -> bool {
        let keep_playing = self.playback.fill(out_buffer);
        let _ = to_main_thread.push(self.playback.position());
        keep_playing
    }
}
