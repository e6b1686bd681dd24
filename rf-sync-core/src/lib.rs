//! Carrier synchronization and clock recovery kernels for a
//! software-defined-radio demodulation toolkit.
//!
//! This crate is the "hard part" of a phase-coherent, timing-recovered
//! digital receiver: a numerically-controlled quadrature oscillator, a
//! family of second-order carrier-tracking loops (plain PLL and the
//! BPSK/QPSK/8PSK Costas variants), and a Gardner-style symbol-timing
//! recovery loop. Every primitive consumes and produces scalars; the
//! surrounding block/port runtime, AGC/tuner/RRC blocks, and host I/O
//! are external collaborators reached only through the narrow
//! `feed`/`track` contracts described in each module.
//!
//! All internal frequencies are normalized: cycles/sample (`fnor`) or
//! radians/sample (`omega` = 2π·fnor). [`config`] carries the
//! boundary-conversion helpers a host uses before handing values to
//! the core.

pub mod clock_recovery;
pub mod config;
pub mod costas;
pub mod errors;
pub mod filters;
pub mod logging;
pub mod ncqo;
pub mod phase;
pub mod pipeline;
pub mod pll;
pub mod sampler;
pub mod symbol_stream;
pub mod telemetry;
pub mod utils;

use num_complex::Complex;

/// A single floating-point sample. The core fixes precision at `f64`
/// through this one alias rather than a generic-precision abstraction;
/// switching the whole crate to `f32` is a one-line change here.
pub type Sample = f64;

/// A complex baseband sample at [`Sample`] precision.
pub type Cplx = Complex<Sample>;

pub use clock_recovery::{ClockAlgorithm, ClockDetector};
pub use costas::{CostasKind, CostasLoop};
pub use errors::{ConfigError, InvalidStateError, Result, SyncError};
pub use ncqo::Ncqo;
pub use pipeline::{ComplexProcessor, ReceiveChain};
pub use pll::Pll;
pub use sampler::Sampler;
pub use symbol_stream::{StreamReader, SymbolStream};
pub use telemetry::LoopTelemetry;
