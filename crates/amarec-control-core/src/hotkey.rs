//! Hotkey chord definition and blind press/release sequencing.

use crate::{ControlError, CoreResult};

use std::{fmt, panic::Location, str::FromStr, thread, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

/// Delay between pressing and releasing the chord, about one 60Hz frame.
pub const DEFAULT_KEY_HOLD: Duration = Duration::from_millis(16);

/// Highest function key accepted by [`KeyCode`].
pub const MAX_FUNCTION_KEY: u8 = 24;

/// One key in a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Ctrl modifier.
    Control,
    /// Shift modifier.
    Shift,
    /// Alt modifier.
    Alt,
    /// Windows / Command key.
    Meta,
    /// `F1`..=`F24`.
    Function(u8),
    /// Printable character key, stored upper-case.
    Char(char),
    /// Raw platform virtual-key code.
    Virtual(u16),
}

impl FromStr for KeyCode {
    type Err = ControlError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        let name = s.trim();
        let lower = name.to_ascii_lowercase();

        let key = match lower.as_str() {
            "ctrl" | "control" => Some(KeyCode::Control),
            "shift" => Some(KeyCode::Shift),
            "alt" | "menu" => Some(KeyCode::Alt),
            "win" | "meta" | "super" | "cmd" => Some(KeyCode::Meta),
            _ => None,
        };
        if let Some(key) = key {
            return Ok(key);
        }

        if let Some(code) = lower.strip_prefix("vk:") {
            let digits = code.trim_start_matches("0x");
            return u16::from_str_radix(digits, 16)
                .map(KeyCode::Virtual)
                .map_err(|e| ControlError::InvalidHotkey {
                    reason: format!("Bad virtual-key code {:?}: {}", name, e),
                    location: ErrorLocation::from(Location::caller()),
                });
        }

        if let Some(number) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            if (1..=MAX_FUNCTION_KEY).contains(&number) {
                return Ok(KeyCode::Function(number));
            }
            return Err(ControlError::InvalidHotkey {
                reason: format!("Function key out of range: {:?}", name),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(KeyCode::Char(c.to_ascii_uppercase())),
            _ => Err(ControlError::InvalidHotkey {
                reason: format!("Unknown key name: {:?}", name),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Control => write!(f, "Ctrl"),
            KeyCode::Shift => write!(f, "Shift"),
            KeyCode::Alt => write!(f, "Alt"),
            KeyCode::Meta => write!(f, "Win"),
            KeyCode::Function(n) => write!(f, "F{}", n),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Virtual(vk) => write!(f, "vk:0x{:02X}", vk),
        }
    }
}

/// Ordered, non-empty set of keys pressed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyChord {
    keys: Vec<KeyCode>,
}

impl Default for HotkeyChord {
    /// Ctrl+Z.
    fn default() -> Self {
        Self {
            keys: vec![KeyCode::Control, KeyCode::Char('Z')],
        }
    }
}

impl HotkeyChord {
    /// Build a chord from already-parsed keys.
    #[track_caller]
    pub fn new(keys: Vec<KeyCode>) -> CoreResult<Self> {
        if keys.is_empty() {
            return Err(ControlError::InvalidHotkey {
                reason: "Hotkey chord has no keys".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self { keys })
    }

    /// Parse key names such as `["ctrl", "z"]`.
    #[track_caller]
    pub fn parse<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = names
            .into_iter()
            .map(|name| name.as_ref().parse::<KeyCode>())
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(keys)
    }

    /// Keys in press order.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }
}

impl fmt::Display for HotkeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

/// Delivers individual synthetic key events to the OS input queue.
pub trait KeyInjector {
    /// Queue a key-down event.
    fn key_down(&mut self, key: KeyCode) -> CoreResult<()>;
    /// Queue a key-up event.
    fn key_up(&mut self, key: KeyCode) -> CoreResult<()>;
}

/// Fire-and-forget chord sender.
///
/// Presses every key in listed order, holds for a short delay, then releases
/// every key in listed order. There is no confirmation that the recorder saw
/// the chord.
pub struct HotkeySignaler {
    injector: Box<dyn KeyInjector>,
    chord: HotkeyChord,
    hold: Duration,
}

impl HotkeySignaler {
    /// Create a signaler for `chord`.
    pub fn new(injector: Box<dyn KeyInjector>, chord: HotkeyChord, hold: Duration) -> Self {
        Self {
            injector,
            chord,
            hold,
        }
    }

    /// Chord this signaler sends.
    pub fn chord(&self) -> &HotkeyChord {
        &self.chord
    }

    /// Press and release the chord once.
    ///
    /// If a key-down fails part way, the keys already pressed are still
    /// released before the error is returned.
    #[instrument(skip(self), fields(chord = %self.chord))]
    pub fn signal(&mut self) -> CoreResult<()> {
        let mut pressed = Vec::with_capacity(self.chord.keys.len());
        let press_result = self.press_all(&mut pressed);

        if press_result.is_ok() {
            thread::sleep(self.hold);
        }

        let release_result = self.release(&pressed);

        press_result?;
        release_result?;

        debug!("Hotkey chord sent");

        Ok(())
    }

    fn press_all(&mut self, pressed: &mut Vec<KeyCode>) -> CoreResult<()> {
        for key in &self.chord.keys {
            self.injector.key_down(*key)?;
            pressed.push(*key);
        }
        Ok(())
    }

    fn release(&mut self, pressed: &[KeyCode]) -> CoreResult<()> {
        let mut first_error = None;
        for key in pressed {
            if let Err(e) = self.injector.key_up(*key) {
                warn!(key = %key, error = ?e, "Key release failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
