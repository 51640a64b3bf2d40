use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Audio error: {0}")]
    Audio(#[from] portaudio::Error),

    #[error("No audio input device available")]
    NoInputDevice,

    #[error("No audio output device available")]
    NoOutputDevice,

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Format mismatch: {0}")]
    FormatMismatch(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type HostResult<T> = Result<T, HostError>;
