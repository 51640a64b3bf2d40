extern crate portaudio;
use portaudio as pa;
use tracing::{debug, info};

use crate::config::StreamConfig;
use crate::error::{HostError, HostResult};

/// The capacity of the queue from the audio thread to the main thread.
const QUEUE_CAPACITY: usize = 1000;

/// Runs on the audio thread. Must not allocate, lock or block.
pub trait AudioProcessor<S>: Send + 'static {
    /// `in_buffer` is empty for output only streams and `out_buffer` is empty for
    /// input only streams. Return false to stop the audio stream, true otherwise.
    fn process(
        &mut self,
        in_buffer: &[f32],
        out_buffer: &mut [f32],
        to_main_thread: &mut rtrb::Producer<S>,
    ) -> bool;
}

enum ActiveStream {
    Duplex(pa::Stream<pa::NonBlocking, pa::Duplex<f32, f32>>),
    Input(pa::Stream<pa::NonBlocking, pa::Input<f32>>),
    Output(pa::Stream<pa::NonBlocking, pa::Output<f32>>),
}

/// A running PortAudio stream driving an [AudioProcessor].
pub struct AudioHost<S> {
    stream: ActiveStream,
    pub from_audio_thread: rtrb::Consumer<S>,
}

fn input_device(pa: &pa::PortAudio) -> HostResult<(pa::DeviceIndex, f64)> {
    let device = pa
        .default_input_device()
        .map_err(|_| HostError::NoInputDevice)?;
    let info = pa.device_info(device)?;
    info!("Using audio input device \"{}\"", info.name);
    Ok((device, info.default_low_input_latency))
}

fn output_device(pa: &pa::PortAudio) -> HostResult<(pa::DeviceIndex, f64)> {
    let device = pa
        .default_output_device()
        .map_err(|_| HostError::NoOutputDevice)?;
    let info = pa.device_info(device)?;
    info!("Using audio output device \"{}\"", info.name);
    Ok((device, info.default_low_output_latency))
}

impl<S> AudioHost<S>
where
    S: Send + 'static,
{
    /// Opens and starts a mono stream reading the default input device and writing the
    /// default output device.
    pub fn duplex<T: AudioProcessor<S>>(
        config: &StreamConfig,
        mut processor: T,
    ) -> HostResult<Self> {
        let (mut to_main_thread, from_audio_thread) =
            rtrb::RingBuffer::<S>::new(QUEUE_CAPACITY).split();
        let pa = pa::PortAudio::new()?;
        let (input, latency) = input_device(&pa)?;
        let (output, _) = output_device(&pa)?;

        let input_params = pa::StreamParameters::<f32>::new(input, 1, true, latency);
        let output_params = pa::StreamParameters::<f32>::new(output, 1, true, latency);
        pa.is_duplex_format_supported(input_params, output_params, config.sample_rate)?;
        let settings = pa::DuplexStreamSettings::new(
            input_params,
            output_params,
            config.sample_rate,
            config.block_size,
        );

        let pa_callback = move |pa::DuplexStreamCallbackArgs {
                                    in_buffer,
                                    out_buffer,
                                    ..
                                }| {
            match processor.process(in_buffer, out_buffer, &mut to_main_thread) {
                true => pa::Continue,
                false => pa::Complete,
            }
        };
        let mut stream = pa.open_non_blocking_stream(settings, pa_callback)?;
        stream.start()?;
        debug!(
            "Started duplex stream, {} Hz, {} frames per block",
            config.sample_rate, config.block_size
        );
        Ok(AudioHost {
            stream: ActiveStream::Duplex(stream),
            from_audio_thread,
        })
    }

    /// Opens and starts a mono stream reading the default input device.
    pub fn input<T: AudioProcessor<S>>(
        config: &StreamConfig,
        mut processor: T,
    ) -> HostResult<Self> {
        let (mut to_main_thread, from_audio_thread) =
            rtrb::RingBuffer::<S>::new(QUEUE_CAPACITY).split();
        let pa = pa::PortAudio::new()?;
        let (input, latency) = input_device(&pa)?;

        let input_params = pa::StreamParameters::<f32>::new(input, 1, true, latency);
        pa.is_input_format_supported(input_params, config.sample_rate)?;
        let settings =
            pa::InputStreamSettings::new(input_params, config.sample_rate, config.block_size);

        let pa_callback = move |pa::InputStreamCallbackArgs { buffer, .. }| {
            match processor.process(buffer, &mut [], &mut to_main_thread) {
                true => pa::Continue,
                false => pa::Complete,
            }
        };
        let mut stream = pa.open_non_blocking_stream(settings, pa_callback)?;
        stream.start()?;
        debug!(
            "Started input stream, {} Hz, {} frames per block",
            config.sample_rate, config.block_size
        );
        Ok(AudioHost {
            stream: ActiveStream::Input(stream),
            from_audio_thread,
        })
    }

    /// Opens and starts an interleaved stream with `channel_count` channels writing the
    /// default output device.
    pub fn output<T: AudioProcessor<S>>(
        config: &StreamConfig,
        channel_count: u16,
        mut processor: T,
    ) -> HostResult<Self> {
        let (mut to_main_thread, from_audio_thread) =
            rtrb::RingBuffer::<S>::new(QUEUE_CAPACITY).split();
        let pa = pa::PortAudio::new()?;
        let (output, latency) = output_device(&pa)?;

        let output_params =
            pa::StreamParameters::<f32>::new(output, channel_count as i32, true, latency);
        pa.is_output_format_supported(output_params, config.sample_rate)?;
        let settings =
            pa::OutputStreamSettings::new(output_params, config.sample_rate, config.block_size);

        let pa_callback = move |pa::OutputStreamCallbackArgs { buffer, .. }| {
            match processor.process(&[], buffer, &mut to_main_thread) {
                true => pa::Continue,
                false => pa::Complete,
            }
        };
        let mut stream = pa.open_non_blocking_stream(settings, pa_callback)?;
        stream.start()?;
        debug!(
            "Started output stream, {} channels, {} Hz, {} frames per block",
            channel_count, config.sample_rate, config.block_size
        );
        Ok(AudioHost {
            stream: ActiveStream::Output(stream),
            from_audio_thread,
        })
    }

    /// False once the processor has asked to stop and the stream has drained.
    pub fn is_active(&self) -> HostResult<bool> {
        let active = match &self.stream {
            ActiveStream::Duplex(stream) => stream.is_active()?,
            ActiveStream::Input(stream) => stream.is_active()?,
            ActiveStream::Output(stream) => stream.is_active()?,
        };
        Ok(active)
    }

    /// Stops the stream. Returns after the last callback has finished, so the processor
    /// is no longer running when this returns.
    pub fn stop(&mut self) -> HostResult<()> {
        match &mut self.stream {
            ActiveStream::Duplex(stream) => stream.stop()?,
            ActiveStream::Input(stream) => stream.stop()?,
            ActiveStream::Output(stream) => stream.stop()?,
        }
        Ok(())
    }

    /// Closes a stopped stream.
    pub fn close(mut self) -> HostResult<()> {
        match &mut self.stream {
            ActiveStream::Duplex(stream) => stream.close()?,
            ActiveStream::Input(stream) => stream.close()?,
            ActiveStream::Output(stream) => stream.close()?,
        }
        debug!("Closed audio stream");
        Ok(())
    }
}
