//! Retry policy contract and the bundled policies.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use crate::transport::{HttpResponse, TransportError};

/// The result of one attempt, as seen by a [`RetryPolicy`].
#[derive(Debug, Clone, Copy)]
pub enum AttemptOutcome<'a> {
    /// The server answered, with a non-success status.
    Response(&'a HttpResponse),
    /// The request never produced a response.
    TransportFailure(&'a TransportError),
}

impl AttemptOutcome<'_> {
    /// Status code of the response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AttemptOutcome::Response(response) => Some(response.status),
            AttemptOutcome::TransportFailure(_) => None,
        }
    }

    /// Returns true for 429, any 5xx, and transport failures other than
    /// cancellation.
    pub fn is_transient(&self) -> bool {
        match self {
            AttemptOutcome::Response(response) => {
                response.status == 429 || (500..600).contains(&response.status)
            }
            AttemptOutcome::TransportFailure(err) => !matches!(err, TransportError::Cancelled),
        }
    }
}

/// Decides whether a failed attempt is retried and how long to wait first.
///
/// `attempt` counts failed attempts so far: `1` is asked right after the
/// first failure, and the returned delay precedes the second overall try.
/// Both methods must be free of side effects; the caller owns the loop.
pub trait RetryPolicy: Send + Sync + fmt::Debug {
    /// Whether another attempt should be made.
    fn should_retry(&self, attempt: u32, outcome: &AttemptOutcome<'_>) -> bool;

    /// How long to wait before the next attempt.
    fn next_delay(&self, attempt: u32, outcome: &AttemptOutcome<'_>) -> Duration;
}

/// Configuration for [`ExponentialBackoff`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for computed delays.
    pub max_delay: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: f64,
    /// Random extra fraction added to each delay, clamped to `multiplier - 1`.
    pub jitter: f64,
    /// Longest `Retry-After` hint that is still waited out. A longer hint
    /// ends the retry loop so the rate-limit error reaches the caller.
    pub max_retry_after: Duration,
}

impl RetryConfig {
    /// Default maximum retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Default initial delay (500 ms).
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
    /// Default maximum delay (30 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);
    /// Default multiplier.
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;
    /// Default jitter fraction.
    pub const DEFAULT_JITTER: f64 = 0.1;
    /// Default ceiling for `Retry-After` hints (5 minutes).
    pub const DEFAULT_MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

    /// Creates a new retry configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the initial delay.
    #[must_use]
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay.
    #[must_use]
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the multiplier. Values below 1.0 are treated as 1.0.
    #[must_use]
    pub fn multiplier(mut self, mult: f64) -> Self {
        self.multiplier = mult;
        self
    }

    /// Sets the jitter fraction. `0.0` makes delays deterministic.
    #[must_use]
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the longest `Retry-After` hint that will be honored.
    #[must_use]
    pub fn max_retry_after(mut self, ceiling: Duration) -> Self {
        self.max_retry_after = ceiling;
        self
    }

    /// Creates a configuration with no retries.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
            jitter: Self::DEFAULT_JITTER,
            max_retry_after: Self::DEFAULT_MAX_RETRY_AFTER,
        }
    }
}

/// Bounded exponential backoff. The default policy.
///
/// Retries 429, 5xx and transport failures while `attempt <= max_retries`.
/// A parseable `Retry-After` header replaces the computed delay, up to
/// [`RetryConfig::max_retry_after`]; a longer hint is not retried at all.
#[derive(Debug, Clone, Default)]
pub struct ExponentialBackoff {
    config: RetryConfig,
}

impl ExponentialBackoff {
    /// Creates a policy from a configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    fn multiplier(&self) -> f64 {
        if self.config.multiplier.is_finite() {
            self.config.multiplier.max(1.0)
        } else {
            1.0
        }
    }

    fn jitter(&self) -> f64 {
        let jitter = if self.config.jitter.is_finite() {
            self.config.jitter
        } else {
            0.0
        };
        jitter.clamp(0.0, self.multiplier() - 1.0)
    }

    /// Computed backoff for an attempt, ignoring any server hint.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let base = self.config.initial_delay.as_secs_f64() * self.multiplier().powi(exponent);

        let jitter = self.jitter();
        let factor = if jitter > 0.0 {
            1.0 + rand::random::<f64>() * jitter
        } else {
            1.0
        };

        let secs = (base * factor).min(self.config.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(secs).unwrap_or(self.config.max_delay)
    }

    fn retry_after(outcome: &AttemptOutcome<'_>) -> Option<Duration> {
        match outcome {
            AttemptOutcome::Response(response) => parse_retry_after(response),
            AttemptOutcome::TransportFailure(_) => None,
        }
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn should_retry(&self, attempt: u32, outcome: &AttemptOutcome<'_>) -> bool {
        if attempt > self.config.max_retries || !outcome.is_transient() {
            return false;
        }
        !matches!(Self::retry_after(outcome), Some(hint) if hint > self.config.max_retry_after)
    }

    fn next_delay(&self, attempt: u32, outcome: &AttemptOutcome<'_>) -> Duration {
        match Self::retry_after(outcome) {
            Some(hint) => hint.min(self.config.max_retry_after),
            None => self.backoff(attempt),
        }
    }
}

/// Never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn should_retry(&self, _attempt: u32, _outcome: &AttemptOutcome<'_>) -> bool {
        false
    }

    fn next_delay(&self, _attempt: u32, _outcome: &AttemptOutcome<'_>) -> Duration {
        Duration::ZERO
    }
}

/// Retries transient failures with the same delay every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before every retry.
    pub delay: Duration,
}

impl FixedDelay {
    /// Creates a fixed-delay policy.
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }
}

impl RetryPolicy for FixedDelay {
    fn should_retry(&self, attempt: u32, outcome: &AttemptOutcome<'_>) -> bool {
        attempt <= self.max_retries && outcome.is_transient()
    }

    fn next_delay(&self, _attempt: u32, _outcome: &AttemptOutcome<'_>) -> Duration {
        self.delay
    }
}

/// Reads the `Retry-After` header as delta-seconds or an HTTP-date.
///
/// A date in the past yields a zero duration.
pub fn parse_retry_after(response: &HttpResponse) -> Option<Duration> {
    response
        .header("retry-after")
        .and_then(|value| parse_retry_after_value(value, Utc::now()))
}

fn parse_retry_after_value(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}
