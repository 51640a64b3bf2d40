//! Raw mode keyboard input and a single line status display.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Sender, TryRecvError};
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use micro_rig::control::{Command, KeyMap, ESCAPE};
use micro_rig::tuner::DetectionResult;
use tracing::{debug, error};

use crate::error::HostResult;

/// How often the key reader checks whether it should stop.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Keeps the terminal in raw mode until dropped.
pub struct RawMode;

impl RawMode {
    pub fn enable() -> HostResult<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Translates a key event to a command. Ctrl-C always quits, since raw mode keeps it
/// from interrupting the process.
pub fn key_command(keys: &KeyMap, key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Esc => keys.lookup(ESCAPE),
        KeyCode::Char(c) => keys.lookup(c),
        _ => None,
    }
}

/// Reads keys on a separate thread and sends the bound commands to the control loop.
pub struct KeyReader {
    thread: JoinHandle<()>,
    shutdown: Sender<()>,
}

impl KeyReader {
    /// The thread ends after sending [Command::Quit], once the receiving end of
    /// `to_control_loop` is dropped or when [KeyReader::stop] is called.
    pub fn spawn(keys: KeyMap, to_control_loop: Sender<Command>) -> Self {
        let (shutdown, shutdown_requested) = bounded::<()>(0);
        let thread = thread::spawn(move || loop {
            if let Err(TryRecvError::Disconnected) = shutdown_requested.try_recv() {
                break;
            }
            let command = match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => key_command(&keys, &key),
                    Ok(_) => None,
                    Err(err) => {
                        error!("Failed to read key: {}", err);
                        Some(Command::Quit)
                    }
                },
                Ok(false) => None,
                Err(err) => {
                    error!("Failed to poll keys: {}", err);
                    Some(Command::Quit)
                }
            };

            if let Some(command) = command {
                debug!("Key command {:?}", command);
                if to_control_loop.send(command).is_err() || command == Command::Quit {
                    break;
                }
            }
        });
        KeyReader { thread, shutdown }
    }

    /// Ends the thread and waits for it.
    pub fn stop(self) {
        drop(self.shutdown);
        if self.thread.join().is_err() {
            error!("Key reader thread panicked");
        }
    }
}

/// Prints lines in raw mode, where a newline does not return the cursor.
pub fn print_line(text: &str) -> HostResult<()> {
    let mut stdout = io::stdout();
    queue!(stdout, Print(text), Print("\r\n"))?;
    stdout.flush()?;
    Ok(())
}

/// Overwrites the current terminal line with `text`.
pub fn show_status(text: &str) -> HostResult<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Formats a tuner reading, e.g. `A4    440.0 Hz  +00 cents`.
pub fn format_detection(result: &DetectionResult) -> String {
    if result.is_silent() {
        return "--".to_string();
    }
    let cents = result.cents.round() as i32;
    let cents_sign = if cents >= 0 { "+" } else { "-" };
    let note = format!("{}{}", result.note.name(), result.octave);
    format!(
        "{:<3} {:7.1} Hz  {}{:02} cents",
        note,
        result.frequency,
        cents_sign,
        cents.abs()
    )
}

/// Draws `cents` as a marker on a bar of `width` characters, centered at 0 and
/// spanning -50 to +50 cents.
pub fn cents_bar(cents: f32, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let center = width / 2;
    let offset = (cents.max(-50.0).min(50.0) / 50.0) * (center as f32);
    let marker = ((center as f32) + offset).round().max(0.0) as usize;
    let marker = marker.min(width - 1);
    (0..width)
        .map(|i| {
            if i == marker {
                '|'
            } else if i == center {
                '.'
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_rig::params::Param;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_commands() {
        let keys = KeyMap::fx_rack();
        assert_eq!(
            key_command(&keys, &press(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(Command::Adjust {
                param: Param::DelayMix,
                steps: 1.0
            })
        );
        assert_eq!(
            key_command(&keys, &press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Command::Quit)
        );
        assert_eq!(
            key_command(&keys, &press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(key_command(&keys, &press(KeyCode::Enter, KeyModifiers::NONE)), None);

        let mut release = press(KeyCode::Char('d'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_command(&keys, &release), None);
    }

    #[test]
    fn test_format_detection() {
        let result = DetectionResult::from_peak(20, 1.0, 44100.0, 2048);
        assert_eq!(format_detection(&result), "A4    430.7 Hz  -37 cents");
        assert_eq!(format_detection(&DetectionResult::default()), "--");
    }

    #[test]
    fn test_cents_bar() {
        assert_eq!(cents_bar(0.0, 11), "-----|-----");
        assert_eq!(cents_bar(-50.0, 11), "|----.-----");
        assert_eq!(cents_bar(100.0, 11), "-----.----|");
        assert_eq!(cents_bar(25.0, 11), "-----.--|--");
        assert_eq!(cents_bar(10.0, 0), "");
    }
}
