//! Single-producer, multi-consumer lossy symbol stream.
//!
//! The clock detector is the sole writer; any number of readers may
//! trail behind at their own pace. Writes never block. A reader that
//! falls more than `capacity` symbols behind observes a
//! [`StreamOverrun`](crate::errors::SyncError::StreamOverrun) and must
//! resynchronize to `tell()` before resuming.

use atomic_float::AtomicF64;
use crossbeam_utils::CachePadded;
use num_complex::Complex64;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Bounded circular buffer of recovered symbols with one writer and
/// many independent readers.
///
/// Alongside the symbol ring itself, the stream carries the clock
/// detector's host-observable telemetry scalars (current baud
/// estimate, current error sample) as plain atomics — a reader on
/// another thread can poll these without taking the slot mutex or
/// disturbing its read cursor.
pub struct SymbolStream {
    capacity: usize,
    // Complex64 has no lock-free atomic representation; the slots are
    // guarded by a mutex while the head/written counters (the only
    // state a reader needs to detect overrun) stay lock-free.
    slots: Mutex<Vec<Complex64>>,
    write_head: CachePadded<AtomicUsize>,
    written: CachePadded<AtomicU64>,
    bnor: CachePadded<AtomicF64>,
    last_error: CachePadded<AtomicF64>,
}

impl SymbolStream {
    pub fn new(capacity: usize) -> crate::errors::Result<Self> {
        if capacity == 0 {
            return Err(crate::errors::ConfigError::ZeroStreamCapacity.into());
        }
        Ok(Self {
            capacity,
            slots: Mutex::new(vec![Complex64::new(0.0, 0.0); capacity]),
            write_head: CachePadded::new(AtomicUsize::new(0)),
            written: CachePadded::new(AtomicU64::new(0)),
            bnor: CachePadded::new(AtomicF64::new(0.0)),
            last_error: CachePadded::new(AtomicF64::new(0.0)),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total symbols ever written, the "tell" a reader resynchronizes to.
    pub fn tell(&self) -> u64 {
        self.written.load(Ordering::Acquire)
    }

    /// Current normalized baud estimate, as last published by the
    /// owning clock detector. Lock-free; safe to poll from any thread.
    pub fn current_bnor(&self) -> f64 {
        self.bnor.load(Ordering::Relaxed)
    }

    /// Current Gardner error sample, as last published by the owning
    /// clock detector.
    pub fn current_error(&self) -> f64 {
        self.last_error.load(Ordering::Relaxed)
    }

    pub(crate) fn publish_telemetry(&self, bnor: f64, last_error: f64) {
        self.bnor.store(bnor, Ordering::Relaxed);
        self.last_error.store(last_error, Ordering::Relaxed);
    }

    /// Push one symbol. Never blocks the writer; an existing reader
    /// more than `capacity` behind will observe this as lap-over on its
    /// next read.
    pub fn write(&self, sample: Complex64) {
        let head = self.write_head.load(Ordering::Relaxed);
        {
            let mut slots = self.slots.lock().expect("symbol stream mutex poisoned");
            slots[head] = sample;
        }
        self.write_head.store((head + 1) % self.capacity, Ordering::Relaxed);
        self.written.fetch_add(1, Ordering::Release);
    }

    /// A reader with an independent monotonic cursor.
    pub fn reader(&self) -> StreamReader<'_> {
        StreamReader { stream: self, cursor: self.tell() }
    }
}

/// One reader's view into a [`SymbolStream`].
pub struct StreamReader<'a> {
    stream: &'a SymbolStream,
    cursor: u64,
}

impl<'a> StreamReader<'a> {
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Resynchronize after an overrun.
    pub fn resync(&mut self) {
        self.cursor = self.stream.tell();
    }

    /// Copy up to `dest.len()` contiguous symbols into `dest`, starting
    /// at the reader's cursor. Returns the count copied, or
    /// [`SyncError::StreamOverrun`](crate::errors::SyncError::StreamOverrun)
    /// if the writer has already overwritten the reader's position.
    pub fn read(&mut self, dest: &mut [Complex64]) -> crate::errors::Result<usize> {
        let written = self.stream.tell();
        if written.saturating_sub(self.cursor) > self.stream.capacity() as u64 {
            return Err(crate::errors::SyncError::StreamOverrun {
                reader_cursor: self.cursor,
                writer_tell: written,
            });
        }

        let available = (written - self.cursor).min(dest.len() as u64) as usize;
        if available == 0 {
            return Ok(0);
        }

        let slots = self.stream.slots.lock().expect("symbol stream mutex poisoned");
        let capacity = self.stream.capacity;
        // The start index corresponding to `self.cursor` within the ring.
        let start = (self.cursor % capacity as u64) as usize;
        for (i, slot) in dest.iter_mut().take(available).enumerate() {
            *slot = slots[(start + i) % capacity];
        }
        drop(slots);

        self.cursor += available as u64;
        Ok(available)
    }
}
