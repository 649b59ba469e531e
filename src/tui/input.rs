// Key debounce
//
// Most terminals only report presses, so a held key reaches us as a burst of
// presses a few tens of milliseconds apart. A hold ends on an explicit
// release event or after RELEASE_GAP of silence. Action keys fire once per
// hold; navigation keys fire on press and then repeat once held long enough.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Silence after which a key counts as let go
pub const RELEASE_GAP: Duration = Duration::from_millis(150);

/// How a held key repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Once per hold: submit, quit, screen switches
    Never,
    /// On press, then every `interval` after being held for `delay`
    After { delay: Duration, interval: Duration },
}

impl Repeat {
    pub fn for_key(key: KeyCode) -> Self {
        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Backspace => {
                Self::After {
                    delay: Duration::from_millis(400),
                    interval: Duration::from_millis(50),
                }
            }
            KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home | KeyCode::End => Self::After {
                delay: Duration::from_millis(250),
                interval: Duration::from_millis(30),
            },
            _ => Self::Never,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    started: Instant,
    last_seen: Instant,
    last_fired: Instant,
}

impl Hold {
    fn at(now: Instant) -> Self {
        Self {
            started: now,
            last_seen: now,
            last_fired: now,
        }
    }
}

/// Keys currently held down, and when they last fired
#[derive(Debug, Default)]
pub struct KeyDebounce {
    held: HashMap<KeyCode, Hold>,
}

impl KeyDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; true when the bound action should run
    pub fn press(&mut self, key: KeyCode) -> bool {
        self.press_at(key, Instant::now())
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    fn press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        if let Some(hold) = self.held.get_mut(&key) {
            if now.duration_since(hold.last_seen) < RELEASE_GAP {
                hold.last_seen = now;
                return match Repeat::for_key(key) {
                    Repeat::Never => false,
                    Repeat::After { delay, interval } => {
                        let due = now.duration_since(hold.started) >= delay
                            && now.duration_since(hold.last_fired) >= interval;
                        if due {
                            hold.last_fired = now;
                        }
                        due
                    }
                };
            }
        }

        self.held.insert(key, Hold::at(now));
        true
    }
}
