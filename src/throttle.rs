//! Token bucket used to pace GitHub API calls that would otherwise trip the
//! secondary rate limiter.
use log::*;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Default spacing between label lookups.
pub const DEFAULT_LABEL_INTERVAL: Duration = Duration::from_secs(5);

/// Longest accepted spacing between label lookups.
pub const MAX_LABEL_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Token bucket holding up to `capacity` tokens, earning one token per
/// `interval`. The bucket starts full.
///
/// Time is read through [`tokio::time`], so tests can drive it with a paused
/// clock.
#[derive(Debug)]
pub struct Throttle {
    capacity: u32,
    interval: Duration,
    tokens: u32,
    last_refill: Instant,
}

impl Throttle {
    pub fn new(capacity: u32, interval: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            interval,
            tokens: capacity,
            last_refill: Instant::now(),
        }
    }

    /// One call per `interval`, no bursts.
    pub fn fixed_interval(interval: Duration) -> Self {
        Self::new(1, interval)
    }

    /// Disabled throttle that never waits.
    pub fn unlimited() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Takes a token, waiting for the next refill when the bucket is empty.
    pub async fn acquire(&mut self) {
        if self.interval.is_zero() {
            return;
        }

        let now = Instant::now();
        self.refill(now);

        if self.tokens == 0 {
            let ready_at = self.last_refill + self.interval;
            debug!(
                "throttling api call for {:?}",
                ready_at.saturating_duration_since(now)
            );
            sleep_until(ready_at).await;
            self.refill(Instant::now());
        }

        self.tokens = self.tokens.saturating_sub(1);
    }

    fn refill(&mut self, now: Instant) {
        if self.tokens >= self.capacity {
            // a full bucket does not bank time
            self.last_refill = now;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_refill);
        let earned = (elapsed.as_nanos() / self.interval.as_nanos())
            .min(u32::MAX as u128) as u32;

        if earned == 0 {
            return;
        }

        self.tokens = self.capacity.min(self.tokens.saturating_add(earned));

        if self.tokens == self.capacity {
            self.last_refill = now;
        } else {
            self.last_refill += self.interval * earned;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::fixed_interval(DEFAULT_LABEL_INTERVAL)
    }
}
