//! Per-second rate derivation from two readings of the same counter.
//!
//! The elapsed time between readings is counted in whole seconds, truncated towards
//! zero. A rate is only produced when
//!
//! - a previous reading exists,
//! - at least one whole second has elapsed (same-second or backwards readings are skipped), and
//! - the elapsed time is strictly below the configured [`MaxRateInterval`], unless it is unlimited.
//!
//! Readings that are NaN or infinite never produce a rate. A counter that went down
//! (reset or wrap) yields a negative rate.

use crate::history::CounterHistoryRecord;
use crate::metric::CounterSample;

/// Upper bound on the age of the previous reading, in seconds. `0` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxRateInterval(u64);

impl MaxRateInterval {
    pub const UNLIMITED: Self = Self(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_unlimited(&self) -> bool {
        self.0 == 0
    }

    fn admits(&self, elapsed_secs: u64) -> bool {
        self.is_unlimited() || elapsed_secs < self.0
    }
}

/// Computes per-second rates, gated by a [`MaxRateInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateCalculator {
    max_interval: MaxRateInterval,
}

impl RateCalculator {
    pub fn new(max_interval: MaxRateInterval) -> Self {
        Self { max_interval }
    }

    pub fn max_interval(&self) -> MaxRateInterval {
        self.max_interval
    }

    /// Returns the rate of `current` relative to `previous`, or `None` if no rate
    /// should be emitted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use netif_rates::history::CounterHistoryRecord;
    /// # use netif_rates::metric::{CounterSample, MetricIdentity};
    /// # use netif_rates::rate::{MaxRateInterval, RateCalculator};
    /// let calculator = RateCalculator::new(MaxRateInterval::UNLIMITED);
    /// let previous = CounterHistoryRecord { value: 100.0, timestamp_ms: 0 };
    /// let current = CounterSample::new(MetricIdentity::new("bytes_sent", &[]), 150.0, 10_000);
    ///
    /// assert_eq!(calculator.rate(&current, Some(previous)), Some(5.0));
    /// assert_eq!(calculator.rate(&current, None), None);
    /// ```
    pub fn rate(
        &self,
        current: &CounterSample,
        previous: Option<CounterHistoryRecord>,
    ) -> Option<f64> {
        let previous = previous?;
        if !current.value().is_finite() || !previous.value.is_finite() {
            log::trace!("Skipping rate for {}: non-finite reading", current.identity());
            return None;
        }
        let elapsed_secs = current.timestamp_ms().saturating_sub(previous.timestamp_ms) / 1000;

        let elapsed_secs = match u64::try_from(elapsed_secs) {
            Ok(secs) if secs > 0 => secs,
            _ => {
                log::trace!(
                    "Skipping rate for {}: {} whole seconds elapsed",
                    current.identity(),
                    elapsed_secs
                );
                return None;
            }
        };

        if !self.max_interval.admits(elapsed_secs) {
            log::trace!(
                "Skipping rate for {}: {}s elapsed, limit is {}s",
                current.identity(),
                elapsed_secs,
                self.max_interval.as_secs()
            );
            return None;
        }

        Some((current.value() - previous.value) / elapsed_secs as f64)
    }
}
