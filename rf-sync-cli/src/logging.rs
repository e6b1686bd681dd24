//! Structured logging for telemetry samples and run statistics.

use crate::config::{LogFormat, LogTarget, LoggingConfig};
use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Structured log event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// One telemetry sample from the running loop.
    Telemetry(TelemetryEvent),
    /// End-of-run statistical summary.
    Statistics(StatisticsEvent),
    Info { message: String },
    Warn { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub timestamp: DateTime<Utc>,
    pub samples_processed: u64,
    pub ncqo_freq_hz: f64,
    pub lock: f64,
    pub bnor: f64,
    pub last_error: f64,
    pub symbols_recovered: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsEvent {
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub samples_processed: u64,
    pub symbols_recovered: u64,
    pub lock: StatSummary,
    pub bnor: StatSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSummary {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl StatSummary {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self { mean: 0.0, stddev: 0.0, min: 0.0, max: 0.0, samples: 0 };
        }
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        Self {
            mean,
            stddev: variance.sqrt(),
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            samples: samples.len(),
        }
    }
}

/// Logger that writes structured log events to stdout/stderr in one of
/// three formats.
pub struct StructuredLogger {
    config: LoggingConfig,
    writer: Box<dyn Write + Send>,
    start_time: DateTime<Utc>,
}

impl StructuredLogger {
    pub fn new(config: LoggingConfig) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match config.target {
            LogTarget::Stdout => Box::new(io::stdout()),
            LogTarget::Stderr => Box::new(io::stderr()),
        };
        Ok(Self { config, writer, start_time: Utc::now() })
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let output = match self.config.format {
            LogFormat::Json => serde_json::to_string(&event)?,
            LogFormat::Logfmt => Self::format_logfmt(&event),
            LogFormat::Pretty => Self::format_pretty(&event),
        };
        writeln!(self.writer, "{}", output)?;
        self.writer.flush()?;
        Ok(())
    }

    fn format_logfmt(event: &LogEvent) -> String {
        let ts = Utc::now().to_rfc3339();
        match event {
            LogEvent::Telemetry(t) => format!(
                "ts=\"{}\" type=telemetry n={} ncqo_freq_hz={:.3} lock={:.4} bnor={:.6} last_error={:.6} symbols={}",
                ts, t.samples_processed, t.ncqo_freq_hz, t.lock, t.bnor, t.last_error, t.symbols_recovered
            ),
            LogEvent::Statistics(s) => format!(
                "ts=\"{}\" type=statistics duration_secs={:.2} samples={} symbols={} lock_mean={:.4} bnor_mean={:.6}",
                ts, s.duration_secs, s.samples_processed, s.symbols_recovered, s.lock.mean, s.bnor.mean
            ),
            LogEvent::Info { message } => format!("ts=\"{}\" level=info msg=\"{}\"", ts, message),
            LogEvent::Warn { message } => format!("ts=\"{}\" level=warn msg=\"{}\"", ts, message),
        }
    }

    fn format_pretty(event: &LogEvent) -> String {
        let ts = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match event {
            LogEvent::Telemetry(t) => format!(
                "[{}] TELEMETRY n={} | NCQO={:.3}Hz lock={:.4} | bnor={:.6} err={:.6} | symbols={}",
                ts, t.samples_processed, t.ncqo_freq_hz, t.lock, t.bnor, t.last_error, t.symbols_recovered
            ),
            LogEvent::Statistics(s) => format!(
                "[{}] STATISTICS ({:.2}s, {} samples, {} symbols) | lock: μ={:.4} σ={:.4} [{:.4},{:.4}] | bnor: μ={:.6} σ={:.6} [{:.6},{:.6}]",
                ts, s.duration_secs, s.samples_processed, s.symbols_recovered,
                s.lock.mean, s.lock.stddev, s.lock.min, s.lock.max,
                s.bnor.mean, s.bnor.stddev, s.bnor.min, s.bnor.max
            ),
            LogEvent::Info { message } => format!("[{}] INFO: {}", ts, message),
            LogEvent::Warn { message } => format!("[{}] WARN: {}", ts, message),
        }
    }

    pub fn elapsed(&self) -> f64 {
        (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}
