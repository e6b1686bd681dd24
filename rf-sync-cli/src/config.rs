//! CLI-specific configuration: which loop to demonstrate, its
//! normalized parameters, the signal source, and logging output.

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Synthetic unmodulated tone tracked by a plain [`rf_sync_core::Pll`].
    Pll,
    /// BPSK/QPSK/8PSK Costas carrier recovery on a synthetic symbol stream.
    Costas,
    /// Full receive chain (Costas → matched filter → clock detector) on
    /// a WAV capture, or on a synthetic modulated tone if no WAV is given.
    Chain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostasKindArg {
    Bpsk,
    Qpsk,
    Psk8,
}

impl From<CostasKindArg> for rf_sync_core::CostasKind {
    fn from(kind: CostasKindArg) -> Self {
        match kind {
            CostasKindArg::Bpsk => rf_sync_core::CostasKind::Bpsk,
            CostasKindArg::Qpsk => rf_sync_core::CostasKind::Qpsk,
            CostasKindArg::Psk8 => rf_sync_core::CostasKind::Psk8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_mode")]
    pub mode: RunMode,
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hz: f64,
    #[serde(default = "default_carrier")]
    pub carrier_hz: f64,
    #[serde(default = "default_loop_bw")]
    pub loop_bw: f64,
    #[serde(default = "default_arm_bw")]
    pub arm_bw: f64,
    #[serde(default = "default_arm_order")]
    pub arm_order: usize,
    #[serde(default = "default_costas_kind")]
    pub costas_kind: CostasKindArg,
    #[serde(default = "default_baud_hz")]
    pub baud_hz: f64,
    #[serde(default = "default_baud_tolerance")]
    pub baud_tolerance: f64,
    #[serde(default = "default_duration")]
    pub duration_secs: f64,
    #[serde(default)]
    pub wav_input: Option<PathBuf>,
}

fn default_mode() -> RunMode {
    RunMode::Chain
}
fn default_sample_rate() -> f64 {
    8000.0
}
fn default_carrier() -> f64 {
    910.0
}
fn default_loop_bw() -> f64 {
    0.00585
}
fn default_arm_bw() -> f64 {
    0.02925
}
fn default_arm_order() -> usize {
    10
}
fn default_costas_kind() -> CostasKindArg {
    CostasKindArg::Qpsk
}
fn default_baud_hz() -> f64 {
    468.0
}
fn default_baud_tolerance() -> f64 {
    0.02
}
fn default_duration() -> f64 {
    5.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            sample_rate_hz: default_sample_rate(),
            carrier_hz: default_carrier(),
            loop_bw: default_loop_bw(),
            arm_bw: default_arm_bw(),
            arm_order: default_arm_order(),
            costas_kind: default_costas_kind(),
            baud_hz: default_baud_hz(),
            baud_tolerance: default_baud_tolerance(),
            duration_secs: default_duration(),
            wav_input: None,
        }
    }
}

impl RunConfig {
    pub fn fhint(&self) -> f64 {
        rf_sync_core::config::abs_to_nor(self.carrier_hz, self.sample_rate_hz)
    }

    pub fn bnor_hint(&self) -> f64 {
        rf_sync_core::config::abs_to_nor(self.baud_hz, self.sample_rate_hz)
    }

    pub fn baud_limits(&self) -> Result<rf_sync_core::config::BaudLimits> {
        let hint = self.bnor_hint();
        let tol = hint * self.baud_tolerance;
        rf_sync_core::config::BaudLimits::new(hint - tol, hint + tol)
            .map_err(|e| color_eyre::eyre::eyre!("invalid baud limits: {e}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Logfmt,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_target")]
    pub target: LogTarget,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default = "default_telemetry_interval")]
    pub telemetry_interval_secs: f64,
}

fn default_log_target() -> LogTarget {
    LogTarget::Stdout
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}
fn default_log_level() -> LogLevel {
    LogLevel::Info
}
fn default_telemetry_interval() -> f64 {
    1.0
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: default_log_target(),
            format: default_log_format(),
            level: default_log_level(),
            telemetry_interval_secs: default_telemetry_interval(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content).wrap_err("failed to parse TOML configuration")
    }
}
