//! Translating single keystrokes into parameter changes.
//!
//! A control thread looks keys up in a [KeyMap] and sends the resulting [Command]s
//! to whoever owns the [ParameterStore], which applies them with [apply].

use crate::params::{Param, ParameterStore};

/// The escape key.
pub const ESCAPE: char = '\u{1b}';

/// An action requested from the control surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Move a parameter by a number of steps.
    Adjust { param: Param, steps: f32 },
    /// Stop capturing, keep running.
    StopRecording,
    /// Stop capturing and exit.
    Quit,
}

/// What the control loop should do after applying a [Command].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    /// A parameter changed to the contained value.
    Changed(Param, f32),
    Continue,
    /// Recording should stop.
    StopRecording,
    Quit,
}

/// Maps keys to commands.
#[derive(Copy, Clone, Debug)]
pub struct KeyMap {
    bindings: &'static [(char, Command)],
}

const fn adjust(param: Param, steps: f32) -> Command {
    Command::Adjust { param, steps }
}

const CLEAN_AMP_BINDINGS: [(char, Command); 7] = [
    ('+', adjust(Param::Gain, 1.0)),
    ('-', adjust(Param::Gain, -1.0)),
    ('[', adjust(Param::Volume, -1.0)),
    (']', adjust(Param::Volume, 1.0)),
    ('{', adjust(Param::NoiseThreshold, -1.0)),
    ('}', adjust(Param::NoiseThreshold, 1.0)),
    ('q', Command::Quit),
];

const FX_RACK_BINDINGS: [(char, Command); 12] = [
    ('w', adjust(Param::Gain, 1.0)),
    ('s', adjust(Param::Gain, -1.0)),
    ('a', adjust(Param::DelayMix, -1.0)),
    ('d', adjust(Param::DelayMix, 1.0)),
    ('q', adjust(Param::ReverbMix, -1.0)),
    ('e', adjust(Param::ReverbMix, 1.0)),
    ('r', adjust(Param::FlangerMix, 1.0)),
    ('f', adjust(Param::FlangerMix, -1.0)),
    ('t', adjust(Param::ChorusMix, 1.0)),
    ('g', adjust(Param::ChorusMix, -1.0)),
    ('x', Command::StopRecording),
    (ESCAPE, Command::Quit),
];

const TUNER_BINDINGS: [(char, Command); 2] = [('q', Command::Quit), (ESCAPE, Command::Quit)];

impl KeyMap {
    pub const fn new(bindings: &'static [(char, Command)]) -> Self {
        KeyMap { bindings }
    }

    /// `+`/`-` gain, `[`/`]` volume, `{`/`}` noise gate threshold, `q` quits.
    pub fn clean_amp() -> Self {
        KeyMap::new(&CLEAN_AMP_BINDINGS)
    }

    /// `w`/`s` gain, `a`/`d` delay, `q`/`e` reverb, `r`/`f` flanger, `t`/`g` chorus.
    /// `x` stops the recording and keeps playing, escape stops the recording and quits.
    pub fn fx_rack() -> Self {
        KeyMap::new(&FX_RACK_BINDINGS)
    }

    /// `q` or escape quits.
    pub fn tuner() -> Self {
        KeyMap::new(&TUNER_BINDINGS)
    }

    /// Returns the command bound to `key`, if any.
    pub fn lookup(&self, key: char) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, command)| *command)
    }

    pub fn bindings(&self) -> &'static [(char, Command)] {
        self.bindings
    }
}

/// Applies `command` to `params`.
pub fn apply(command: Command, params: &ParameterStore) -> Flow {
    match command {
        Command::Adjust { param, steps } => {
            let before = params.get(param);
            let after = params.adjust(param, steps);
            if after == before {
                Flow::Continue
            } else {
                Flow::Changed(param, after)
            }
        }
        Command::StopRecording => Flow::StopRecording,
        Command::Quit => Flow::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_amp_keys() {
        let keys = KeyMap::clean_amp();
        let params = ParameterStore::clean_amp();
        let gain = params.get(Param::Gain);

        let flow = apply(keys.lookup('+').unwrap(), &params);
        assert_eq!(flow, Flow::Changed(Param::Gain, params.get(Param::Gain)));
        assert!((params.get(Param::Gain) - (gain + 0.1)).abs() < 1e-6);

        apply(keys.lookup('{').unwrap(), &params);
        assert!((params.get(Param::NoiseThreshold) - 0.004).abs() < 1e-6);
        apply(keys.lookup('[').unwrap(), &params);
        assert!((params.get(Param::Volume) - 0.9).abs() < 1e-6);

        assert_eq!(keys.lookup('q'), Some(Command::Quit));
        assert_eq!(keys.lookup('x'), None);
    }

    #[test]
    fn test_fx_rack_keys() {
        let keys = KeyMap::fx_rack();
        let params = ParameterStore::fx_rack();
        for (key, param, expected) in [
            ('d', Param::DelayMix, 0.4_f32),
            ('e', Param::ReverbMix, 0.3),
            ('f', Param::FlangerMix, 0.1),
            ('g', Param::ChorusMix, 0.1),
            ('s', Param::Gain, 0.9),
        ]
        .iter()
        {
            apply(keys.lookup(*key).unwrap(), &params);
            assert!((params.get(*param) - *expected).abs() < 1e-6, "key {}", key);
        }
        // In the effects rack q lowers the reverb, only escape quits.
        assert_eq!(keys.lookup('q'), Some(adjust(Param::ReverbMix, -1.0)));
        assert_eq!(keys.lookup(ESCAPE), Some(Command::Quit));
        assert_eq!(apply(keys.lookup('x').unwrap(), &params), Flow::StopRecording);
    }

    #[test]
    fn test_clamped_adjust_is_not_a_change() {
        let params = ParameterStore::fx_rack();
        params.set(Param::DelayMix, 1.0);
        assert_eq!(apply(adjust(Param::DelayMix, 1.0), &params), Flow::Continue);
    }

    #[test]
    fn test_stop_and_quit() {
        let params = ParameterStore::default();
        assert_eq!(apply(Command::StopRecording, &params), Flow::StopRecording);
        assert_eq!(apply(Command::Quit, &params), Flow::Quit);
        assert_eq!(KeyMap::tuner().lookup(ESCAPE), Some(Command::Quit));
    }
}
