//! Telemetry sampling and statistical aggregation over a run.

use crate::logging::{StatSummary, StatisticsEvent, TelemetryEvent};
use chrono::Utc;
use std::time::Instant;

/// Accumulates periodic [`rf_sync_core::LoopTelemetry`] snapshots and
/// computes running statistics for the end-of-run summary.
pub struct TelemetryAggregator {
    lock_samples: Vec<f64>,
    bnor_samples: Vec<f64>,
    samples_processed: u64,
    symbols_recovered: u64,
    last_sample_time: Instant,
    sample_interval_secs: f64,
}

impl TelemetryAggregator {
    pub fn new(sample_interval_secs: f64) -> Self {
        Self {
            lock_samples: Vec::new(),
            bnor_samples: Vec::new(),
            samples_processed: 0,
            symbols_recovered: 0,
            last_sample_time: Instant::now(),
            sample_interval_secs,
        }
    }

    pub fn record(&mut self, samples_processed: u64, symbols_recovered: u64, telemetry: rf_sync_core::LoopTelemetry) {
        self.samples_processed = samples_processed;
        self.symbols_recovered = symbols_recovered;
        self.lock_samples.push(telemetry.lock);
        self.bnor_samples.push(telemetry.bnor);
    }

    fn should_sample(&self) -> bool {
        self.last_sample_time.elapsed().as_secs_f64() >= self.sample_interval_secs
    }

    /// Emit a telemetry event if the sampling interval has elapsed.
    pub fn maybe_sample(&mut self, ncqo_freq_hz: f64, last_error: f64) -> Option<TelemetryEvent> {
        if !self.should_sample() {
            return None;
        }
        self.last_sample_time = Instant::now();
        Some(TelemetryEvent {
            timestamp: Utc::now(),
            samples_processed: self.samples_processed,
            ncqo_freq_hz,
            lock: self.lock_samples.last().copied().unwrap_or(0.0),
            bnor: self.bnor_samples.last().copied().unwrap_or(0.0),
            last_error,
            symbols_recovered: self.symbols_recovered,
        })
    }

    pub fn statistics(&self, duration_secs: f64) -> StatisticsEvent {
        StatisticsEvent {
            timestamp: Utc::now(),
            duration_secs,
            samples_processed: self.samples_processed,
            symbols_recovered: self.symbols_recovered,
            lock: StatSummary::from_samples(&self.lock_samples),
            bnor: StatSummary::from_samples(&self.bnor_samples),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telemetry(lock: f64, bnor: f64) -> rf_sync_core::LoopTelemetry {
        rf_sync_core::LoopTelemetry { freq: 0.1, phase: 0.0, lock, bnor, last_error: 0.0 }
    }

    #[test]
    fn statistics_reflect_recorded_samples() {
        let mut agg = TelemetryAggregator::new(1.0);
        agg.record(100, 5, telemetry(0.5, 0.01));
        agg.record(200, 10, telemetry(0.9, 0.011));
        let stats = agg.statistics(1.0);
        assert_eq!(stats.samples_processed, 200);
        assert_eq!(stats.symbols_recovered, 10);
        assert_eq!(stats.lock.samples, 2);
        assert!((stats.lock.mean - 0.7).abs() < 1e-9);
    }
}
