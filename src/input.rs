//! Input handling
//!
//! Discrete actions are edge-triggered: a key fires once when first pressed
//! and stays silent while it is held, so repeated delivery of the same press
//! is harmless. Soft drop is level-triggered and only reports whether its key
//! is currently held.
//!
//! Terminals without key release events are handled by treating a key as
//! released once no event for it has been seen for a while.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Time after which a key is considered released if no event for it arrived.
/// Longer than the terminal's initial auto-repeat delay.
const HOLD_TIMEOUT: Duration = Duration::from_millis(550);

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("Ignoring unknown key binding {:?}", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            rotate_cw: Self::parse_keys(&settings.keys.rotate_cw),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Find the discrete action bound to a key
    fn action_for(&self, code: KeyCode) -> Option<Action> {
        if self.move_left.contains(&code) {
            Some(Action::MoveLeft)
        } else if self.move_right.contains(&code) {
            Some(Action::MoveRight)
        } else if self.rotate_cw.contains(&code) {
            Some(Action::RotateCW)
        } else if self.hard_drop.contains(&code) {
            Some(Action::HardDrop)
        } else if self.quit.contains(&code) {
            Some(Action::Quit)
        } else {
            None
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Input handler tracking held keys
pub struct InputHandler {
    bindings: KeyBindings,
    /// Discrete actions whose key is still held, with the last time it was seen
    held: HashMap<Action, Instant>,
    /// Last time the soft drop key was seen
    soft_drop: Option<Instant>,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashMap::new(),
            soft_drop: None,
        }
    }

    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(KeyBindings::from_settings(settings))
    }

    /// Handle a key press event. Returns an action only on a fresh press.
    pub fn key_down(&mut self, key: KeyEvent, now: Instant) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);

        if self.bindings.soft_drop.contains(&code) {
            self.soft_drop = Some(now);
            return None;
        }

        let action = self.bindings.action_for(code)?;
        match self.held.insert(action, now) {
            Some(last_seen) if now.saturating_duration_since(last_seen) <= HOLD_TIMEOUT => None,
            _ => Some(action),
        }
    }

    /// Handle a key release event (may not be delivered by every terminal)
    pub fn key_up(&mut self, key: KeyEvent) {
        let code = normalize_key(key.code);

        if self.bindings.soft_drop.contains(&code) {
            self.soft_drop = None;
        } else if let Some(action) = self.bindings.action_for(code) {
            self.held.remove(&action);
        }
    }

    /// Release keys that have gone quiet (call every frame)
    pub fn update(&mut self, now: Instant) {
        self.held
            .retain(|_, last_seen| now.saturating_duration_since(*last_seen) <= HOLD_TIMEOUT);

        if let Some(last_seen) = self.soft_drop {
            if now.saturating_duration_since(last_seen) > HOLD_TIMEOUT {
                self.soft_drop = None;
            }
        }
    }

    /// Whether the soft drop key is currently held
    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop.is_some()
    }

    /// Forget all held keys
    pub fn clear(&mut self) {
        self.held.clear();
        self.soft_drop = None;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
