//! Lock free parameter store shared between the audio callback and a control thread.
//!
//! Every parameter is an `f32` stored as bits in an `AtomicU32`, so reads never
//! observe a partially written value and never block. There is no ordering between
//! parameters: reading two parameters while a control thread writes both may observe
//! one old and one new value.
//!
//! ```
//! use micro_rig::params::{Param, ParameterStore};
//!
//! let params = ParameterStore::fx_rack();
//! // Values are clamped to the parameter's range.
//! assert_eq!(params.set(Param::DelayMix, 1.7), 1.0);
//! // Adjusting moves a parameter a number of steps.
//! params.set(Param::ChorusMix, 0.5);
//! assert!((params.adjust(Param::ChorusMix, -1.0) - 0.4).abs() < 1e-6);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

/// The number of parameters in a [ParameterStore].
pub const PARAM_COUNT: usize = 8;

/// A named, tunable parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Param {
    /// Input gain.
    Gain,
    /// Output volume of the clean amp.
    Volume,
    /// Noise gate threshold, as an absolute sample value.
    NoiseThreshold,
    /// Distortion drive.
    Drive,
    /// Wet level of the delay.
    DelayMix,
    /// Wet level of the reverb.
    ReverbMix,
    /// Wet level of the flanger.
    FlangerMix,
    /// Wet level of the chorus.
    ChorusMix,
}

impl Param {
    pub const ALL: [Param; PARAM_COUNT] = [
        Param::Gain,
        Param::Volume,
        Param::NoiseThreshold,
        Param::Drive,
        Param::DelayMix,
        Param::ReverbMix,
        Param::FlangerMix,
        Param::ChorusMix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Param::Gain => "Gain",
            Param::Volume => "Volume",
            Param::NoiseThreshold => "Noise Gate",
            Param::Drive => "Drive",
            Param::DelayMix => "Delay",
            Param::ReverbMix => "Reverb",
            Param::FlangerMix => "Flanger",
            Param::ChorusMix => "Chorus",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Default value, range and adjustment step of a parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub default: f32,
    pub min: f32,
    pub max: f32,
    /// The amount a single [ParameterStore::adjust] step changes the value by.
    pub step: f32,
}

impl ParamSpec {
    pub const fn new(default: f32, min: f32, max: f32, step: f32) -> Self {
        ParamSpec {
            default,
            min,
            max,
            step,
        }
    }

    fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

/// An `f32` that can be shared between threads.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        AtomicF32(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Atomically replaces the value with `f(value)`, returning the new value.
    pub fn update<F>(&self, mut f: F) -> f32
    where
        F: FnMut(f32) -> f32,
    {
        let mut new_value = 0.0;
        // The closure always returns Some, so fetch_update cannot fail.
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                new_value = f(f32::from_bits(bits));
                Some(new_value.to_bits())
            });
        new_value
    }
}

/// A plain copy of all parameter values, taken once per block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParamSnapshot {
    pub gain: f32,
    pub volume: f32,
    pub noise_threshold: f32,
    pub drive: f32,
    pub delay_mix: f32,
    pub reverb_mix: f32,
    pub flanger_mix: f32,
    pub chorus_mix: f32,
}

/// Independently readable and writable parameters, safe to share by reference
/// (or `Arc`) between the audio callback and any number of control threads.
#[derive(Debug)]
pub struct ParameterStore {
    values: [AtomicF32; PARAM_COUNT],
    specs: [ParamSpec; PARAM_COUNT],
}

const MIX: ParamSpec = ParamSpec::new(0.0, 0.0, 1.0, 0.1);
const DRIVE: ParamSpec = ParamSpec::new(2.0, 1.0, 10.0, 0.1);
const NOISE_THRESHOLD: ParamSpec = ParamSpec::new(0.005, 0.0, 0.1, 0.001);

impl ParameterStore {
    /// Creates a store from one spec per parameter, in [Param::ALL] order.
    /// Defaults outside their range are clamped.
    pub fn from_specs(specs: [ParamSpec; PARAM_COUNT]) -> Self {
        for spec in specs.iter() {
            if !(spec.min <= spec.max) {
                panic!("Parameter min must not be greater than max")
            }
        }
        ParameterStore {
            values: specs.map(|spec| AtomicF32::new(spec.clamp(spec.default))),
            specs,
        }
    }

    /// Parameters of the clean amp: gain, volume and noise gate threshold.
    pub fn clean_amp() -> Self {
        ParameterStore::from_specs([
            ParamSpec::new(2.0, 0.0, 10.0, 0.1),
            ParamSpec::new(1.0, 0.0, 2.0, 0.1),
            NOISE_THRESHOLD,
            DRIVE,
            MIX,
            MIX,
            MIX,
            MIX,
        ])
    }

    /// Parameters of the effects rack: gain, drive and the four wet levels.
    pub fn fx_rack() -> Self {
        ParameterStore::from_specs([
            ParamSpec::new(1.0, 0.1, 2.0, 0.1),
            ParamSpec::new(1.0, 0.0, 2.0, 0.1),
            NOISE_THRESHOLD,
            DRIVE,
            ParamSpec { default: 0.3, ..MIX },
            ParamSpec { default: 0.2, ..MIX },
            ParamSpec { default: 0.2, ..MIX },
            ParamSpec { default: 0.2, ..MIX },
        ])
    }

    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        self.values[param.index()].load()
    }

    /// Stores `value` clamped to the parameter's range and returns the stored value.
    /// NaN is ignored.
    pub fn set(&self, param: Param, value: f32) -> f32 {
        if value.is_nan() {
            return self.get(param);
        }
        let value = self.spec(param).clamp(value);
        self.values[param.index()].store(value);
        value
    }

    /// Moves a parameter by `steps` times its step size, clamped to its range.
    /// The read-modify-write is atomic. Returns the new value.
    pub fn adjust(&self, param: Param, steps: f32) -> f32 {
        let spec = self.spec(param);
        self.values[param.index()].update(|value| {
            let adjusted = value + steps * spec.step;
            if adjusted.is_nan() {
                value
            } else {
                spec.clamp(adjusted)
            }
        })
    }

    /// Restores the default value of a parameter.
    pub fn reset(&self, param: Param) -> f32 {
        let spec = self.spec(param);
        self.set(param, spec.default)
    }

    pub fn spec(&self, param: Param) -> ParamSpec {
        self.specs[param.index()]
    }

    /// Reads every parameter once.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            gain: self.get(Param::Gain),
            volume: self.get(Param::Volume),
            noise_threshold: self.get(Param::NoiseThreshold),
            drive: self.get(Param::Drive),
            delay_mix: self.get(Param::DelayMix),
            reverb_mix: self.get(Param::ReverbMix),
            flanger_mix: self.get(Param::FlangerMix),
            chorus_mix: self.get(Param::ChorusMix),
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        ParameterStore::clean_amp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use std::thread;

    #[test]
    fn test_presets() {
        let clean = ParameterStore::clean_amp();
        assert_eq!(clean.get(Param::Gain), 2.0);
        assert_eq!(clean.get(Param::Volume), 1.0);
        assert_eq!(clean.get(Param::NoiseThreshold), 0.005);

        let rack = ParameterStore::fx_rack();
        assert_eq!(rack.get(Param::Gain), 1.0);
        assert_eq!(rack.get(Param::Drive), 2.0);
        assert_eq!(rack.get(Param::DelayMix), 0.3);
        assert_eq!(rack.get(Param::ReverbMix), 0.2);
        assert_eq!(rack.get(Param::FlangerMix), 0.2);
        assert_eq!(rack.get(Param::ChorusMix), 0.2);
    }

    #[test]
    fn test_clamping() {
        let params = ParameterStore::fx_rack();
        assert_eq!(params.set(Param::DelayMix, -0.5), 0.0);
        assert_eq!(params.set(Param::DelayMix, 3.0), 1.0);
        assert_eq!(params.set(Param::Gain, 0.0), 0.1);
        assert_eq!(params.set(Param::Gain, f32::NAN), 0.1);

        for _ in 0..100 {
            params.adjust(Param::ReverbMix, 1.0);
        }
        assert_eq!(params.get(Param::ReverbMix), 1.0);
        for _ in 0..100 {
            params.adjust(Param::ReverbMix, -1.0);
        }
        assert_eq!(params.get(Param::ReverbMix), 0.0);
        assert_eq!(params.reset(Param::ReverbMix), 0.2);
    }

    #[test]
    fn test_snapshot() {
        let params = ParameterStore::clean_amp();
        params.set(Param::Volume, 0.5);
        let snapshot = params.snapshot();
        assert_eq!(snapshot.volume, 0.5);
        assert_eq!(snapshot.gain, 2.0);
        // A snapshot is a copy.
        params.set(Param::Volume, 0.7);
        assert_eq!(snapshot.volume, 0.5);
    }

    #[test]
    fn test_concurrent_adjust() {
        let spec = ParamSpec::new(0.0, 0.0, 1000.0, 1.0);
        let params = Arc::new(ParameterStore::from_specs([spec; PARAM_COUNT]));
        let handles: std::vec::Vec<_> = (0..4)
            .map(|_| {
                let params = params.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        params.adjust(Param::Drive, 1.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        // No update is lost.
        assert_eq!(params.get(Param::Drive), 400.0);
    }

    #[test]
    #[should_panic]
    fn test_inverted_range() {
        ParameterStore::from_specs([ParamSpec::new(0.0, 1.0, 0.0, 0.1); PARAM_COUNT]);
    }
}
