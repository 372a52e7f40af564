//! Remote "someone is typing" indicator with expiry timers.
//!
//! Timers are plain deadlines checked by [`TypingIndicator::expire`], so the
//! indicator never needs a clock of its own and cancelling is dropping them.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How repeated typing notifications interact with pending timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingExpiryPolicy {
    /// Each notification starts its own timer; the first one to fire clears the flag.
    #[default]
    Independent,
    /// A notification replaces any pending timer.
    Debounced,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypingIndicator {
    active: bool,
    deadlines: Vec<Instant>,
}

impl TypingIndicator {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending_timers(&self) -> usize {
        self.deadlines.len()
    }

    /// Raises the indicator and schedules its expiry `window` after `now`.
    pub fn notify(&mut self, now: Instant, window: Duration, policy: TypingExpiryPolicy) {
        if policy == TypingExpiryPolicy::Debounced {
            self.deadlines.clear();
        }
        self.active = true;
        self.deadlines.push(now + window);
    }

    /// Lowers the indicator without touching pending timers.
    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Fires every timer due at `now`. Returns true if any fired.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.deadlines.len();
        self.deadlines.retain(|deadline| *deadline > now);

        let fired = self.deadlines.len() != before;
        if fired {
            self.active = false;
        }
        fired
    }

    pub fn cancel_all(&mut self) {
        self.deadlines.clear();
    }
}
