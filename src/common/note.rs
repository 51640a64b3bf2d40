use micromath::F32Ext;

/// The number of octaves covered by note mapping, starting at octave 0.
pub const OCTAVE_COUNT: u8 = 9;

/// One of the twelve notes of the chromatic scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Note {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// All notes in chromatic order, starting at C.
pub const NOTE_TABLE: [Note; 12] = [
    Note::C,
    Note::CSharp,
    Note::D,
    Note::DSharp,
    Note::E,
    Note::F,
    Note::FSharp,
    Note::G,
    Note::GSharp,
    Note::A,
    Note::ASharp,
    Note::B,
];

// Note names sorted as strings, starting at A. Decides which note wins a tie.
const SEARCH_ORDER: [Note; 12] = [
    Note::A,
    Note::ASharp,
    Note::B,
    Note::C,
    Note::CSharp,
    Note::D,
    Note::DSharp,
    Note::E,
    Note::F,
    Note::FSharp,
    Note::G,
    Note::GSharp,
];

impl Note {
    /// The note name, using sharps.
    pub fn name(&self) -> &'static str {
        match self {
            Note::C => "C",
            Note::CSharp => "C#",
            Note::D => "D",
            Note::DSharp => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::FSharp => "F#",
            Note::G => "G",
            Note::GSharp => "G#",
            Note::A => "A",
            Note::ASharp => "A#",
            Note::B => "B",
        }
    }

    /// The frequency in Hz of this note in octave 0.
    pub fn base_frequency(&self) -> f32 {
        match self {
            Note::C => 16.35,
            Note::CSharp => 17.32,
            Note::D => 18.35,
            Note::DSharp => 19.45,
            Note::E => 20.60,
            Note::F => 21.83,
            Note::FSharp => 23.12,
            Note::G => 24.50,
            Note::GSharp => 25.96,
            Note::A => 27.50,
            Note::ASharp => 29.14,
            Note::B => 30.87,
        }
    }

    /// The frequency in Hz of this note in a given octave.
    pub fn frequency(&self, octave: u8) -> f32 {
        self.base_frequency() * ((1_u32 << octave) as f32)
    }
}

/// Finds the note and octave (0 to 8) whose frequency is closest to `freq`.
///
/// All 108 candidates are compared. On a tie, the candidate found first,
/// iterating octaves from low to high and notes by name (A, A#, B, C, ...), wins.
pub fn closest_note(freq: f32) -> (Note, u8) {
    let mut closest = (Note::C, 0);
    let mut min_diff = f32::MAX;
    for octave in 0..OCTAVE_COUNT {
        for note in SEARCH_ORDER.iter() {
            let diff = F32Ext::abs(freq - note.frequency(octave));
            if diff < min_diff {
                min_diff = diff;
                closest = (*note, octave);
            }
        }
    }
    closest
}

/// The signed distance in [cents](https://en.wikipedia.org/wiki/Cent_(music)) from
/// `target` to `freq`. Positive values mean `freq` is sharp.
///
/// Returns 0 if either frequency is not positive.
pub fn cents_between(freq: f32, target: f32) -> f32 {
    if freq <= 0.0 || target <= 0.0 {
        return 0.0;
    }
    // micromath's log2 is much less accurate for arguments below 1, so take the
    // log of each frequency rather than of their ratio.
    1200.0 * (F32Ext::log2(freq) - F32Ext::log2(target))
}
