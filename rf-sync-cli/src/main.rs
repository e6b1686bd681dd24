mod config;
mod logging;
mod telemetry;

use std::f64::consts::TAU;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use num_complex::Complex64;

use config::{CliConfig, RunMode};
use logging::{LogEvent, StructuredLogger};
use rf_sync_core::clock_recovery::{ClockAlgorithm, ClockDetector};
use rf_sync_core::costas::CostasLoop;
use rf_sync_core::filters::FirLowpass;
use rf_sync_core::pipeline::ReceiveChain;
use rf_sync_core::pll::Pll;
use rf_sync_core::symbol_stream::SymbolStream;
use rf_sync_core::utils::complex_from_interleaved;
use telemetry::TelemetryAggregator;

/// Demonstrator for the rf-sync-core carrier and clock recovery kernels.
#[derive(Parser, Debug)]
#[command(author, version, about = "Carrier/clock synchronization demonstrator", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults are used if omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the configured run mode.
    #[arg(short, long, value_enum)]
    mode: Option<CliMode>,

    /// Read I/Q samples from a WAV file instead of synthesizing a tone.
    #[arg(short = 'i', long)]
    wav_input: Option<PathBuf>,

    /// Emit the verbose per-sample diagnostic log in addition to telemetry.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliMode {
    Pll,
    Costas,
    Chain,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::from_file(path).wrap_err_with(|| format!("failed to load config from {path}"))?,
        None => CliConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.run.mode = match mode {
            CliMode::Pll => RunMode::Pll,
            CliMode::Costas => RunMode::Costas,
            CliMode::Chain => RunMode::Chain,
        };
    }
    if args.wav_input.is_some() {
        config.run.wav_input = args.wav_input.clone();
    }
    if args.verbose {
        config.logging.telemetry_interval_secs = 0.0;
    }

    let mut logger = StructuredLogger::new(config.logging.clone())?;
    logger.log(LogEvent::Info {
        message: format!("starting run in {:?} mode", config.run.mode),
    })?;

    let samples = match &config.run.wav_input {
        Some(path) => load_wav(path)?,
        None => synthesize(&config.run),
    };
    logger.log(LogEvent::Info {
        message: format!("{} samples loaded", samples.len()),
    })?;

    let mut aggregator = TelemetryAggregator::new(config.logging.telemetry_interval_secs);

    match config.run.mode {
        RunMode::Pll => run_pll(&config.run, &samples, &mut logger, &mut aggregator)?,
        RunMode::Costas => run_costas(&config.run, &samples, &mut logger, &mut aggregator)?,
        RunMode::Chain => run_chain(&config.run, &samples, &mut logger, &mut aggregator)?,
    }

    let stats = aggregator.statistics(logger.elapsed());
    logger.log(LogEvent::Statistics(stats))?;

    Ok(())
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} samples ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn load_wav(path: &PathBuf) -> Result<Vec<Complex64>> {
    let mut reader = hound::WavReader::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let floats: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().map(|s| s.map(|v| v as f64)).collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample as u32 - 1)) as f64;
            reader.samples::<i32>().map(|s| s.map(|v| v as f64 / max)).collect::<std::result::Result<_, _>>()?
        }
    };
    if spec.channels == 2 {
        Ok(complex_from_interleaved(&floats))
    } else {
        Ok(floats.into_iter().map(|re| Complex64::new(re, 0.0)).collect())
    }
}

/// Builds a synthetic carrier, phase-modulated at the configured baud
/// rate with a fixed deterministic symbol pattern (no signal source
/// dependency beyond the crates already in this manifest).
fn synthesize(run: &config::RunConfig) -> Vec<Complex64> {
    let n = (run.duration_secs * run.sample_rate_hz) as usize;
    let fnor = run.fhint();
    let bnor = run.bnor_hint();
    let symbols_per_kind: &[Complex64] = match run.costas_kind {
        config::CostasKindArg::Bpsk => &[Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)],
        config::CostasKindArg::Qpsk => &[
            Complex64::new(1.0, 1.0),
            Complex64::new(-1.0, 1.0),
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, -1.0),
        ],
        config::CostasKindArg::Psk8 => &[
            Complex64::new(1.0, 0.0),
            Complex64::new(0.707, 0.707),
            Complex64::new(0.0, 1.0),
            Complex64::new(-0.707, 0.707),
            Complex64::new(-1.0, 0.0),
            Complex64::new(-0.707, -0.707),
            Complex64::new(0.0, -1.0),
            Complex64::new(0.707, -0.707),
        ],
    };
    let samples_per_symbol = (1.0 / bnor).round().max(1.0) as usize;
    let mut out = Vec::with_capacity(n);
    let mut phase = 0.0;
    for i in 0..n {
        let symbol_idx = (i / samples_per_symbol) % symbols_per_kind.len();
        let symbol = symbols_per_kind[symbol_idx];
        let carrier = Complex64::from_polar(1.0, phase);
        out.push(symbol * carrier);
        phase += TAU * fnor;
    }
    out
}

fn run_pll(
    run: &config::RunConfig,
    samples: &[Complex64],
    logger: &mut StructuredLogger,
    aggregator: &mut TelemetryAggregator,
) -> Result<()> {
    let mut pll = Pll::init(run.fhint(), run.loop_bw).map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
    let bar = progress_bar(samples.len());
    for (n, x) in samples.iter().enumerate() {
        let _ = pll.track(*x);
        let t = pll.telemetry();
        aggregator.record(n as u64 + 1, 0, t);
        if let Some(event) = aggregator.maybe_sample(t.freq * run.sample_rate_hz, t.last_error) {
            logger.log(LogEvent::Telemetry(event))?;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(())
}

fn run_costas(
    run: &config::RunConfig,
    samples: &[Complex64],
    logger: &mut StructuredLogger,
    aggregator: &mut TelemetryAggregator,
) -> Result<()> {
    let mut costas = CostasLoop::init(run.costas_kind.into(), run.fhint(), run.arm_bw, run.arm_order, run.loop_bw, 1.0)
        .map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
    let bar = progress_bar(samples.len());
    for (n, x) in samples.iter().enumerate() {
        let _ = costas.feed(*x, None);
        let t = costas.telemetry();
        aggregator.record(n as u64 + 1, 0, t);
        if let Some(event) = aggregator.maybe_sample(t.freq * run.sample_rate_hz, t.last_error) {
            logger.log(LogEvent::Telemetry(event))?;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(())
}

fn run_chain(
    run: &config::RunConfig,
    samples: &[Complex64],
    logger: &mut StructuredLogger,
    aggregator: &mut TelemetryAggregator,
) -> Result<()> {
    let costas = CostasLoop::init(run.costas_kind.into(), run.fhint(), run.arm_bw, run.arm_order, run.loop_bw, 1.0)
        .map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
    let matched_filter = Box::new(FirLowpass::identity());
    let stream = Arc::new(SymbolStream::new(4096).map_err(|e| color_eyre::eyre::eyre!("{e}"))?);
    let limits = run.baud_limits()?;
    let clock = ClockDetector::init(ClockAlgorithm::Gardner, run.bnor_hint(), limits, 0.01, 0.001, 1.0, stream.clone());
    let mut chain = ReceiveChain::new(None, costas, matched_filter, clock);
    let bar = progress_bar(samples.len());

    for (n, x) in samples.iter().enumerate() {
        chain.feed(*x, None).map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
        let costas_t = chain.costas().telemetry();
        let clock_t = chain.clock().telemetry();
        let combined = rf_sync_core::LoopTelemetry {
            freq: costas_t.freq,
            phase: costas_t.phase,
            lock: costas_t.lock,
            bnor: clock_t.bnor,
            last_error: clock_t.last_error,
        };
        aggregator.record(n as u64 + 1, stream.tell(), combined);
        if let Some(event) = aggregator.maybe_sample(combined.freq * run.sample_rate_hz, combined.last_error) {
            logger.log(LogEvent::Telemetry(event))?;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(())
}
