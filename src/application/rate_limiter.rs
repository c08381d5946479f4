//! Client-side request throttling.
//!
//! The web trader rejects bursts of requests, so every call goes through a
//! token bucket from the `governor` crate. Throttling only delays requests;
//! nothing is ever retried.

use crate::application::config::RateLimiterConfig;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type DirectLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock>;

/// Token bucket shared by all requests of a client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Option<Arc<DirectLimiter>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `period_seconds`
    ///
    /// `max_requests == 0` or a zero period gives a limiter that never waits.
    ///
    /// # Arguments
    ///
    /// * `config` - Requests per period and burst size, a zero burst meaning
    ///   `max_requests`
    ///
    /// # Example
    ///
    /// ```ignore
    /// use degiroasync::application::config::RateLimiterConfig;
    /// use degiroasync::application::rate_limiter::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(&RateLimiterConfig {
    ///     max_requests: 30,
    ///     period_seconds: 60,
    ///     burst_size: 5,
    /// });
    /// assert!(limiter.check());
    /// ```
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        let Some(max_requests) = NonZeroU32::new(config.max_requests) else {
            return Self::unlimited();
        };
        let period = Duration::from_secs(config.period_seconds);
        let replenish = period / max_requests.get();
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(max_requests);

        match Quota::with_period(replenish) {
            Some(quota) => Self {
                limiter: Some(Arc::new(GovernorRateLimiter::direct(quota.allow_burst(burst)))),
            },
            None => Self::unlimited(),
        }
    }

    /// A limiter that lets everything through
    #[must_use]
    pub fn unlimited() -> Self {
        Self { limiter: None }
    }

    /// Waits until a request may be sent
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// True if a request may be sent right now, consuming a token if so
    #[must_use]
    pub fn check(&self) -> bool {
        match &self.limiter {
            Some(limiter) => limiter.check().is_ok(),
            None => true,
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}
