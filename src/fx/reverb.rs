/// Single tap reverb approximation: `sample * (1 - mix) + sample * mix * 0.5`.
///
/// There is no reverberation tail. At full mix the signal is halved.
#[inline]
pub fn reverb(sample: f32, mix: f32) -> f32 {
    sample * (1.0 - mix) + (sample * mix * 0.5)
}
