//! Deterministic stand-ins for the OS collaborators.

use crate::{
    Clock, ControlError, CoreResult, FileLockState, KeyCode, KeyInjector, LockProbe, WindowTitles,
};

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    panic::Location,
    path::{Path, PathBuf},
    rc::Rc,
};

use chrono::{NaiveDate, NaiveDateTime};
use error_location::ErrorLocation;

pub(crate) struct FakeWindows(pub(crate) Vec<String>);

impl FakeWindows {
    pub(crate) fn none() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn with(titles: &[&str]) -> Self {
        Self(titles.iter().map(|t| t.to_string()).collect())
    }
}

impl WindowTitles for FakeWindows {
    fn visible_titles(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Returns queued states in order, then repeats the last one forever.
pub(crate) struct ScriptedProbe {
    states: RefCell<VecDeque<FileLockState>>,
    last: Cell<FileLockState>,
    pub(crate) probed: Rc<RefCell<Vec<PathBuf>>>,
}

impl ScriptedProbe {
    pub(crate) fn always(state: FileLockState) -> Self {
        Self::sequence(&[state])
    }

    pub(crate) fn sequence(states: &[FileLockState]) -> Self {
        Self {
            states: RefCell::new(states.iter().copied().collect()),
            last: Cell::new(FileLockState::Absent),
            probed: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl LockProbe for ScriptedProbe {
    fn probe(&self, path: &Path) -> FileLockState {
        self.probed.borrow_mut().push(path.to_path_buf());
        if let Some(next) = self.states.borrow_mut().pop_front() {
            self.last.set(next);
        }
        self.last.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyEvent {
    Down(KeyCode),
    Up(KeyCode),
}

/// Records every injected event; optionally refuses one key-down.
#[derive(Default)]
pub(crate) struct RecordingInjector {
    pub(crate) events: Rc<RefCell<Vec<KeyEvent>>>,
    pub(crate) fail_down_on: Option<KeyCode>,
}

impl RecordingInjector {
    pub(crate) fn new() -> (Self, Rc<RefCell<Vec<KeyEvent>>>) {
        let injector = Self::default();
        let events = Rc::clone(&injector.events);
        (injector, events)
    }
}

impl KeyInjector for RecordingInjector {
    #[track_caller]
    fn key_down(&mut self, key: KeyCode) -> CoreResult<()> {
        if self.fail_down_on == Some(key) {
            return Err(ControlError::HotkeyFailed {
                reason: format!("refused {}", key),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.events.borrow_mut().push(KeyEvent::Down(key));
        Ok(())
    }

    fn key_up(&mut self, key: KeyCode) -> CoreResult<()> {
        self.events.borrow_mut().push(KeyEvent::Up(key));
        Ok(())
    }
}

pub(crate) struct FixedClock(pub(crate) NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[allow(clippy::unwrap_used)]
pub(crate) fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}
