//! Per-user, per-command invocation cooldowns.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Mutex-guarded map of (user, command) to the instant the cooldown was
/// armed. The only cross-invocation state the orchestrator keeps; updated
/// atomically per key.
#[derive(Debug)]
pub struct CooldownLedger {
    window: Duration,
    entries: Mutex<HashMap<(u64, &'static str), Instant>>,
}

impl CooldownLedger {
    /// Build a ledger with the given cooldown window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Time left before `user` may run `command` again, or `None` when the
    /// command is available. Expired entries are dropped on the way out.
    #[must_use]
    pub fn remaining(&self, user: u64, command: &'static str) -> Option<Duration> {
        let mut entries = self.lock();
        let armed_at = entries.get(&(user, command)).copied()?;
        let elapsed = armed_at.elapsed();
        if elapsed < self.window {
            Some(self.window - elapsed)
        } else {
            entries.remove(&(user, command));
            None
        }
    }

    /// Arm the cooldown for `user` / `command`, starting the window now.
    pub fn arm(&self, user: u64, command: &'static str) {
        self.lock().insert((user, command), Instant::now());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(u64, &'static str), Instant>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
