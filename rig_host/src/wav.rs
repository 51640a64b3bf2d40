use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound;
use micro_rig::capture::CaptureSink;
use micro_rig::mixer::mix;
use tracing::{debug, info};

use crate::error::{HostError, HostResult};

/// Sample rate and channel count of a WAV file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub channel_count: u16,
}

/// The contents of a WAV file as interleaved samples in [-1, 1].
#[derive(Clone, Debug)]
pub struct WavClip {
    pub format: WavFormat,
    pub samples: Vec<f32>,
}

impl WavClip {
    pub fn frame_count(&self) -> usize {
        self.samples.len() / (self.format.channel_count as usize)
    }
}

/// Reads an integer or float PCM WAV file. Integer samples are divided by the largest
/// positive value of their bit depth.
pub fn read_wav<P: AsRef<Path>>(path: P) -> HostResult<WavClip> {
    let reader = hound::WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let format = WavFormat {
        sample_rate: spec.sample_rate,
        channel_count: spec.channels,
    };

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = ((1_i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            reader
                .into_samples::<i32>()
                .map(|sample| sample.map(|sample| (sample as f32) / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    debug!(
        "Read {} samples from {}, {} bit {:?}, {:?}",
        samples.len(),
        path.as_ref().display(),
        spec.bits_per_sample,
        spec.sample_format,
        format
    );

    Ok(WavClip { format, samples })
}

fn pcm16_spec(format: WavFormat) -> hound::WavSpec {
    hound::WavSpec {
        channels: format.channel_count,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

fn to_pcm16(sample: f32) -> i16 {
    let clamped_sample = sample.max(-1.0).min(1.0);
    (clamped_sample * (i16::MAX as f32)).round() as i16
}

/// Writes interleaved samples as 16 bit PCM, clamping to [-1, 1].
pub fn write_wav<P: AsRef<Path>>(path: P, format: WavFormat, buffer: &[f32]) -> HostResult<()> {
    let mut writer = hound::WavWriter::create(path.as_ref(), pcm16_spec(format))?;
    for sample in buffer.iter() {
        writer.write_sample(to_pcm16(*sample))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Mixes two WAV files with equal sample rate and channel count at half level each and
/// writes the result, truncated to the shorter input, as 16 bit PCM. Returns the
/// format and frame count of the output.
pub fn mix_files<P, Q, R>(first: P, second: Q, output: R) -> HostResult<(WavFormat, usize)>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let first_clip = read_wav(&first)?;
    let second_clip = read_wav(&second)?;
    if first_clip.format != second_clip.format {
        return Err(HostError::FormatMismatch(format!(
            "{} is {} Hz with {} channels, {} is {} Hz with {} channels",
            first.as_ref().display(),
            first_clip.format.sample_rate,
            first_clip.format.channel_count,
            second.as_ref().display(),
            second_clip.format.sample_rate,
            second_clip.format.channel_count
        )));
    }

    let mixed = mix(&first_clip.samples, &second_clip.samples);
    write_wav(&output, first_clip.format, &mixed)?;
    let frame_count = mixed.len() / (first_clip.format.channel_count as usize);
    info!(
        "Mixed {} frames into {}",
        frame_count,
        output.as_ref().display()
    );
    Ok((first_clip.format, frame_count))
}

/// Lets the audio thread hand captured samples to a [CaptureWriter] through a
/// wait free queue. Samples that don't fit are rejected.
pub struct RingCapture(pub rtrb::Producer<f32>);

impl CaptureSink for RingCapture {
    fn append(&mut self, block: &[f32]) -> usize {
        let mut count = 0;
        for sample in block.iter() {
            if self.0.push(*sample).is_err() {
                break;
            }
            count += 1;
        }
        count
    }
}

/// Creates a capture queue holding `capacity` samples.
pub fn capture_queue(capacity: usize) -> (RingCapture, rtrb::Consumer<f32>) {
    let (producer, consumer) = rtrb::RingBuffer::<f32>::new(capacity).split();
    (RingCapture(producer), consumer)
}

/// Drains captured samples into a mono 16 bit WAV file on the main thread.
pub struct CaptureWriter {
    writer: hound::WavWriter<BufWriter<File>>,
    from_audio_thread: rtrb::Consumer<f32>,
    written_samples: usize,
}

impl CaptureWriter {
    pub fn create<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        from_audio_thread: rtrb::Consumer<f32>,
    ) -> HostResult<Self> {
        let format = WavFormat {
            sample_rate,
            channel_count: 1,
        };
        let writer = hound::WavWriter::create(path.as_ref(), pcm16_spec(format))?;
        info!("Recording to {}", path.as_ref().display());
        Ok(CaptureWriter {
            writer,
            from_audio_thread,
            written_samples: 0,
        })
    }

    /// Writes every sample currently in the queue. Returns the number of samples written.
    pub fn drain(&mut self) -> HostResult<usize> {
        let mut count = 0;
        while let Ok(sample) = self.from_audio_thread.pop() {
            self.writer.write_sample(to_pcm16(sample))?;
            count += 1;
        }
        self.written_samples += count;
        Ok(count)
    }

    pub fn written_samples(&self) -> usize {
        self.written_samples
    }

    /// Drains the queue and completes the file. Call after the audio stream has stopped,
    /// so nothing is appended afterwards. Returns the total number of samples written.
    pub fn finalize(mut self) -> HostResult<usize> {
        self.drain()?;
        self.writer.finalize()?;
        debug!("Finalized recording, {} samples", self.written_samples);
        Ok(self.written_samples)
    }
}
