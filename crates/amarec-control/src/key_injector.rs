use amarec_control_core::{ControlError, CoreResult, KeyCode, KeyInjector};

use std::panic::Location;

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use error_location::ErrorLocation;
use tracing::trace;

/// Map a chord key onto enigo's key model.
///
/// Letters are sent lower-case so no implicit Shift is added.
pub(crate) fn to_enigo_key(key: KeyCode) -> Option<Key> {
    let mapped = match key {
        KeyCode::Control => Key::Control,
        KeyCode::Shift => Key::Shift,
        KeyCode::Alt => Key::Alt,
        KeyCode::Meta => Key::Meta,
        KeyCode::Function(n) => return function_key(n),
        KeyCode::Char(c) => Key::Unicode(c.to_ascii_lowercase()),
        KeyCode::Virtual(vk) => Key::Other(u32::from(vk)),
    };
    Some(mapped)
}

fn function_key(n: u8) -> Option<Key> {
    let key = match n {
        1 => Key::F1,
        2 => Key::F2,
        3 => Key::F3,
        4 => Key::F4,
        5 => Key::F5,
        6 => Key::F6,
        7 => Key::F7,
        8 => Key::F8,
        9 => Key::F9,
        10 => Key::F10,
        11 => Key::F11,
        12 => Key::F12,
        13 => Key::F13,
        14 => Key::F14,
        15 => Key::F15,
        16 => Key::F16,
        17 => Key::F17,
        18 => Key::F18,
        19 => Key::F19,
        20 => Key::F20,
        // VK_F1 is 0x70; F21..F24 follow contiguously.
        #[cfg(target_os = "windows")]
        21..=24 => Key::Other(0x70 + u32::from(n) - 1),
        _ => return None,
    };
    Some(key)
}

/// RAII key injector that guarantees held keys are released when dropped.
///
/// Prevents stuck modifiers if the process fails or panics between key-down
/// and key-up. On drop, releases with best-effort semantics -- if the release
/// fails, the OS resets modifier state on the next physical key press.
pub struct EnigoInjector {
    enigo: Enigo,
    held: Vec<Key>,
}

impl EnigoInjector {
    /// Connect to the platform input queue.
    #[track_caller]
    pub(crate) fn new() -> CoreResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| ControlError::HotkeyFailed {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self {
            enigo,
            held: Vec::new(),
        })
    }

    #[track_caller]
    fn send(&mut self, key: KeyCode, direction: Direction) -> CoreResult<Key> {
        let mapped = to_enigo_key(key).ok_or_else(|| ControlError::HotkeyFailed {
            reason: format!("Key {} is not supported on this platform", key),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.enigo
            .key(mapped, direction)
            .map_err(|e| ControlError::HotkeyFailed {
                reason: format!("Failed to send {:?} for {}: {}", direction, key, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        trace!(key = %key, direction = ?direction, "Key event injected");

        Ok(mapped)
    }
}

impl KeyInjector for EnigoInjector {
    fn key_down(&mut self, key: KeyCode) -> CoreResult<()> {
        let mapped = self.send(key, Direction::Press)?;
        self.held.push(mapped);
        Ok(())
    }

    fn key_up(&mut self, key: KeyCode) -> CoreResult<()> {
        let mapped = self.send(key, Direction::Release)?;
        if let Some(pos) = self.held.iter().position(|k| *k == mapped) {
            self.held.remove(pos);
        }
        Ok(())
    }
}

impl Drop for EnigoInjector {
    fn drop(&mut self) {
        for key in self.held.drain(..) {
            let _ = self.enigo.key(key, Direction::Release);
        }
    }
}
