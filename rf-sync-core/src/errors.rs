//! Error taxonomy for the synchronization kernels

use thiserror::Error;

/// Top-level error type for all rf-sync-core operations
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    #[error("symbol stream overrun: reader at {reader_cursor}, writer tell {writer_tell}")]
    StreamOverrun {
        reader_cursor: u64,
        writer_tell: u64,
    },
}

/// Configuration errors raised synchronously at `init`/setter call sites.
///
/// The affected primitive is never left half-initialized: construction
/// functions validate before allocating, and setters that would violate
/// an invariant return this error without mutating state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("negative or non-finite frequency: {fnor}")]
    NegativeFrequency { fnor: f64 },

    #[error("fixed-mode NCQO requires a strictly positive frequency, got {fnor}")]
    ZeroFrequencyFixedNcqo { fnor: f64 },

    #[error("baud limits inverted: bmin={bmin} > bmax={bmax}")]
    BaudLimitsInverted { bmin: f64, bmax: f64 },

    #[error("arm filter order {order} cannot be realized")]
    UnrealizableArmOrder { order: usize },

    #[error("loop bandwidth must be in (0, 0.5), got {loop_bw}")]
    InvalidLoopBandwidth { loop_bw: f64 },

    #[error("symbol stream capacity must be nonzero")]
    ZeroStreamCapacity,
}

/// Raised when a loop's selectable mode is the null variant.
///
/// `feed`/`step` still return a neutral zero sample rather than
/// propagating this as a hard failure, per the core's propagation policy.
#[derive(Debug, Error)]
pub enum InvalidStateError {
    #[error("Costas loop invoked with kind = None")]
    CostasKindNone,

    #[error("clock detector invoked with algorithm = None")]
    ClockAlgorithmNone,
}

/// `FixedModeMutation` is not represented as an `Err` variant here: per
/// spec, mutating a fixed-mode NCQO is logged and ignored, with the call
/// returning normally and state left unchanged. Call sites that want to
/// observe this can check `Ncqo::is_fixed()` before mutating.
pub type Result<T> = std::result::Result<T, SyncError>;
