//! Gravity timer
//!
//! A single repeating tick with two rates: the base rate and the faster
//! soft-drop rate. Switching rate restarts the period from the switch time.

use std::time::{Duration, Instant};

/// Default time between gravity ticks
pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(1000);
/// Default time between ticks while soft drop is held
pub const SOFT_DROP_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct DropTimer {
    base: Duration,
    fast: Duration,
    soft_drop: bool,
    last_fire: Instant,
    running: bool,
}

impl DropTimer {
    pub fn new(base: Duration, fast: Duration, now: Instant) -> Self {
        Self {
            base,
            fast,
            soft_drop: false,
            last_fire: now,
            running: true,
        }
    }

    /// Current period between ticks
    pub fn period(&self) -> Duration {
        if self.soft_drop { self.fast } else { self.base }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Select the soft-drop rate. The period restarts only when the rate changes.
    pub fn set_soft_drop(&mut self, held: bool, now: Instant) {
        if held != self.soft_drop {
            self.soft_drop = held;
            self.last_fire = now;
        }
    }

    /// Returns true when a tick is due. Fires at most once per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if now.saturating_duration_since(self.last_fire) >= self.period() {
            self.last_fire = now;
            return true;
        }
        false
    }

    /// Stop the timer; it stays silent until `restart`
    pub fn cancel(&mut self) {
        self.running = false;
    }

    /// Re-arm a cancelled timer at the base rate
    pub fn restart(&mut self, now: Instant) {
        self.running = true;
        self.soft_drop = false;
        self.last_fire = now;
    }
}
