// Key debounce for the presenter
//
// Two behaviors:
// - State-change keys trigger once per press (Enter, F-keys, q, t)
// - Repeatable keys trigger on every press, and on held-key repeats after
//   an initial delay (arrows, Tab, PageUp/PageDown)
//
// Without keyboard enhancement most terminals never send Release or Repeat
// events: every keystroke, held or tapped, arrives as a Press. A Press of a
// repeatable key therefore always fires; only explicit Repeat events are
// rate-limited. A state-change key that is "still pressed" re-triggers after
// a short debounce window.

use crossterm::event::{KeyCode, KeyEventKind};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Re-trigger window for state-change keys without Release events
const STATE_CHANGE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBehavior {
    /// Trigger only on state change (press → release)
    StateChange,

    /// Trigger on every press; Repeat events fire after the initial delay
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Slide stepping: a held arrow advances a few slides per second
    pub fn slide_step() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(200),
        }
    }

    /// Moving between form controls and scrolling overlays
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(60),
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    is_pressed: bool,
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn release(&mut self) {
        *self = Self::default();
    }

    fn trigger(&mut self, now: Instant, fresh_press: bool) {
        if fresh_press || self.press_started.is_none() {
            self.press_started = Some(now);
        }
        self.is_pressed = true;
        self.last_triggered = Some(now);
    }
}

/// Input handler that manages key behaviors
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    pub fn configure_key(&mut self, key: KeyCode, behavior: KeyBehavior) {
        self.key_behaviors.insert(key, behavior);
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.configure_key(*key, behavior);
        }
    }

    /// Behavior for `key`; unconfigured keys are state-change
    pub fn behavior(&self, key: KeyCode) -> KeyBehavior {
        self.key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange)
    }

    /// Handle a Press or Repeat event
    /// Returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode, kind: KeyEventKind) -> bool {
        self.handle_key_press_at(key, kind, Instant::now())
    }

    fn handle_key_press_at(&mut self, key: KeyCode, kind: KeyEventKind, now: Instant) -> bool {
        let behavior = self.behavior(key);
        let state = self.key_states.entry(key).or_default();

        let fire = match (behavior, kind) {
            (_, KeyEventKind::Release) => {
                state.release();
                return false;
            }

            // Each discrete press is one step, however quickly they come
            (KeyBehavior::Repeatable { .. }, KeyEventKind::Press) => true,

            (
                KeyBehavior::Repeatable {
                    initial_delay,
                    repeat_interval,
                },
                KeyEventKind::Repeat,
            ) => {
                match (state.press_started, state.last_triggered) {
                    (Some(press_start), Some(last)) => {
                        now.duration_since(press_start) >= initial_delay
                            && now.duration_since(last) >= repeat_interval
                    }
                    // Repeat with no Press seen yet starts a hold
                    _ => true,
                }
            }

            (KeyBehavior::StateChange, KeyEventKind::Repeat) => false,

            (KeyBehavior::StateChange, KeyEventKind::Press) => {
                match (state.is_pressed, state.last_triggered) {
                    (true, Some(last)) => now.duration_since(last) >= STATE_CHANGE_DEBOUNCE,
                    _ => true,
                }
            }
        };

        if fire {
            state.trigger(now, kind == KeyEventKind::Press);
        }
        fire
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            state.release();
        }
    }

    /// Key table for the presenter
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(&[KeyCode::Left, KeyCode::Right], KeyBehavior::slide_step());

        handler.configure_keys(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::Tab,
                KeyCode::BackTab,
                KeyCode::PageUp,
                KeyCode::PageDown,
            ],
            KeyBehavior::navigation(),
        );

        handler.configure_keys(
            &[
                KeyCode::Enter,
                KeyCode::Esc,
                KeyCode::Home,
                KeyCode::End,
                KeyCode::Char('q'),
                KeyCode::Char('Q'),
                KeyCode::Char('t'),
                KeyCode::F(1),
                KeyCode::F(2),
            ],
            KeyBehavior::StateChange,
        );

        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}
