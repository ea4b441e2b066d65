//! Process-wide circuit breaker for expired upstream sessions.
//!
//! An `Unauthorized` response means the session cookie is dead and every
//! subsequent call will fail identically until the operator refreshes
//! credentials. After a run of consecutive `Unauthorized` results the
//! breaker opens and short-circuits remote calls for a cool-down period,
//! so one stale cookie does not turn every user invocation into its own
//! upstream failure.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::error;

use crate::errors::FetchError;

/// Consecutive `Unauthorized` results before the breaker opens.
pub const TRIP_THRESHOLD: u32 = 3;

/// How long the breaker stays open once tripped.
pub const OPEN_PERIOD: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Default)]
struct BreakerState {
    consecutive_unauthorized: u32,
    open_until: Option<Instant>,
}

/// Tracks consecutive `Unauthorized` failures and gates remote calls.
#[derive(Debug)]
pub struct SessionBreaker {
    trip_threshold: u32,
    open_period: Duration,
    state: Mutex<BreakerState>,
}

impl Default for SessionBreaker {
    fn default() -> Self {
        Self::new(TRIP_THRESHOLD, OPEN_PERIOD)
    }
}

impl SessionBreaker {
    /// Construct a breaker with explicit thresholds.
    #[must_use]
    pub fn new(trip_threshold: u32, open_period: Duration) -> Self {
        Self {
            trip_threshold,
            open_period,
            state: Mutex::new(BreakerState::default()),
        }
    }

    /// Gate a remote call.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Unauthorized`] while the breaker is open.
    /// Once the open period has elapsed the next call is let through to
    /// probe the session; a further `Unauthorized` re-trips immediately.
    pub fn check(&self) -> Result<(), FetchError> {
        let mut state = self.lock();
        if let Some(open_until) = state.open_until {
            if Instant::now() < open_until {
                return Err(FetchError::Unauthorized(
                    "upstream session circuit is open; awaiting credential refresh".into(),
                ));
            }
            state.open_until = None;
        }
        Ok(())
    }

    /// Record an `Unauthorized` result; opens the breaker at the threshold.
    pub fn record_unauthorized(&self) {
        let mut state = self.lock();
        state.consecutive_unauthorized += 1;
        if state.consecutive_unauthorized >= self.trip_threshold && state.open_until.is_none() {
            state.open_until = Some(Instant::now() + self.open_period);
            error!(
                consecutive = state.consecutive_unauthorized,
                open_seconds = self.open_period.as_secs(),
                "upstream session appears expired; short-circuiting remote calls"
            );
        }
    }

    /// Record a successful call, closing the breaker and resetting the count.
    pub fn record_success(&self) {
        let mut state = self.lock();
        state.consecutive_unauthorized = 0;
        state.open_until = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
