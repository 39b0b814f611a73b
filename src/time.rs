//! Time abstractions for testability.
//!
//! - [`Clock`] supplies "now" to date validation in the resource modules.
//! - [`Sleeper`] supplies the inter-attempt delays of the retry loop.
//!
//! Production code uses [`SystemClock`] and [`TokioSleeper`]; tests inject
//! fixed clocks and [`InstantSleeper`] (or a recording sleeper) instead.

use std::future::Future;
use std::time::{Duration, SystemTime};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use resman_client::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a single instant.
///
/// Useful for pinning "today" when validating date ranges.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SystemTime);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

/// Abstraction over asynchronous sleeping.
///
/// The retry loop awaits [`Sleeper::sleep`] between attempts, so tests can
/// skip or record delays instead of waiting for them.
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_returns_current_time() {
        let clock = SystemClock;
        let before = SystemTime::now();
        let result = clock.now();
        let after = SystemTime::now();

        assert!(result >= before);
        assert!(result <= after);
    }

    #[test]
    fn fixed_clock_returns_pinned_time() {
        let pinned = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let clock = FixedClock(pinned);

        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), pinned);
    }

    #[test]
    fn clocks_and_sleepers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemClock>();
        assert_send_sync::<FixedClock>();
        assert_send_sync::<TokioSleeper>();
        assert_send_sync::<InstantSleeper>();
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_for_duration() {
        let start = tokio::time::Instant::now();

        TokioSleeper.sleep(Duration::from_secs(15)).await;

        assert!(start.elapsed() >= Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn instant_sleeper_does_not_advance_time() {
        let start = tokio::time::Instant::now();

        InstantSleeper.sleep(Duration::from_secs(15)).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
