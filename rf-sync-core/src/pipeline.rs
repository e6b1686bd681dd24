//! Receive-chain assembly: a thin composition helper wiring raw
//! samples through an optional AGC/filter stage, a Costas loop for
//! carrier lock, a matched filter, and the clock detector.
//!
//! This is specified only by the contracts each block exposes — no
//! scheduler, no threads, no queues (those belong to the surrounding
//! block/port runtime). A host that wants a different topology is free
//! to call each primitive directly instead of going through
//! [`ReceiveChain`].

use crate::clock_recovery::ClockDetector;
use crate::costas::CostasLoop;
use crate::errors::Result;
use crate::filters::Filter;
use crate::logging::SignalLogger;
use num_complex::Complex64;

/// Shared contract for anything that can sit in a receive chain ahead
/// of or after the Costas loop: one complex sample in, one out. Any
/// [`Filter`] (the arm low-pass, a host-supplied AGC/RRC stage)
/// satisfies this automatically.
pub trait ComplexProcessor {
    fn process(&mut self, x: Complex64) -> Complex64;
}

impl<T: Filter> ComplexProcessor for T {
    fn process(&mut self, x: Complex64) -> Complex64 {
        self.feed(x)
    }
}

/// Raw samples → optional pre-filter → Costas carrier lock → matched
/// filter → clock detector. The only non-optional stages are the
/// Costas loop and the clock detector; a caller that doesn't need AGC
/// or a matched filter ahead of timing recovery can pass an identity
/// processor for either slot.
pub struct ReceiveChain {
    pre_filter: Option<Box<dyn ComplexProcessor + Send>>,
    costas: CostasLoop,
    matched_filter: Box<dyn ComplexProcessor + Send>,
    clock: ClockDetector,
}

impl ReceiveChain {
    pub fn new(
        pre_filter: Option<Box<dyn ComplexProcessor + Send>>,
        costas: CostasLoop,
        matched_filter: Box<dyn ComplexProcessor + Send>,
        clock: ClockDetector,
    ) -> Self {
        Self { pre_filter, costas, matched_filter, clock }
    }

    pub fn costas(&self) -> &CostasLoop {
        &self.costas
    }

    pub fn clock(&self) -> &ClockDetector {
        &self.clock
    }

    /// Push one raw sample through the whole chain. Recovered symbols
    /// land in the clock detector's [`crate::symbol_stream::SymbolStream`];
    /// this call does not return one directly.
    pub fn feed(&mut self, x: Complex64, mut logger: Option<&mut SignalLogger>) -> Result<()> {
        let x = match &mut self.pre_filter {
            Some(stage) => stage.process(x),
            None => x,
        };
        let y = self.costas.feed(x, logger.as_deref_mut());
        let z = self.matched_filter.process(y);
        self.clock.feed(z, logger)
    }
}
