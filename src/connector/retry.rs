//! Retry policy for the request pipeline.

use std::time::Duration;

/// Delay before each attempt of the default schedule, indexed by attempt
/// number (0-based).
pub const DEFAULT_DELAYS: [Duration; 4] = [
    Duration::ZERO,
    Duration::ZERO,
    Duration::from_millis(15_000),
    Duration::from_millis(15_000),
];

/// Returns the default delay to wait before `attempt` (0-based).
///
/// Attempt 0 never waits. Attempts past the end of the table reuse its
/// last entry.
///
/// ```
/// use std::time::Duration;
/// use resman_client::connector::delay_for_attempt;
///
/// assert_eq!(delay_for_attempt(1), Duration::ZERO);
/// assert_eq!(delay_for_attempt(2), Duration::from_secs(15));
/// ```
#[must_use]
pub const fn delay_for_attempt(attempt: u32) -> Duration {
    let index = attempt as usize;
    if index < DEFAULT_DELAYS.len() {
        DEFAULT_DELAYS[index]
    } else {
        DEFAULT_DELAYS[DEFAULT_DELAYS.len() - 1]
    }
}

/// Fixed-schedule retry behavior.
///
/// The schedule holds one delay per attempt; its length is the attempt
/// budget. Only failures without a status code are retried, see
/// [`IsRetryable`](super::IsRetryable).
///
/// # Defaults
///
/// - 4 attempts
/// - delays of 0 ms, 0 ms, 15000 ms, 15000 ms before attempts 0..=3
///
/// # Example
///
/// ```
/// use resman_client::connector::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 4);
///
/// // Tighter pacing for a batch job
/// let quick = RetryPolicy::new().with_delays(vec![Duration::ZERO, Duration::from_millis(250)]);
/// assert_eq!(quick.max_attempts(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = DEFAULT_DELAYS.len() as u32;

    /// Creates a policy with the default schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delays: DEFAULT_DELAYS.to_vec(),
        }
    }

    /// Replaces the delay schedule; its length becomes the attempt budget.
    ///
    /// The first entry is ignored since no delay precedes attempt 0.
    ///
    /// # Panics
    ///
    /// Panics if `delays` is empty.
    #[must_use]
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        assert!(
            !delays.is_empty(),
            "retry schedule must allow at least one attempt"
        );
        self.delays = delays;
        self
    }

    /// Returns the total number of attempts (including the first).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn max_attempts(&self) -> u32 {
        self.delays.len() as u32
    }

    /// Returns the delay schedule.
    #[must_use]
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Returns the delay to wait before `attempt` (0-based).
    ///
    /// Always zero for attempt 0.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.delays
            .get(attempt as usize)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns true if another attempt may follow `attempt` (0-based).
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
