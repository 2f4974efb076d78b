// Periodic heap usage report. The numbers come from whatever allocator
// the firmware runs (e.g. esp_alloc::HEAP.stats()); this side only
// decides when to print.

use core::fmt;

use crate::clock::TimeSource;
use crate::gate::IntervalGate;

pub trait MemoryStats {
    fn used(&self) -> usize;
    fn total(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    pub used: usize,
    pub total: usize,
}

impl MemoryUsage {
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.used.saturating_mul(100) / self.total
    }
}

impl MemoryStats for MemoryUsage {
    fn used(&self) -> usize {
        self.used
    }

    fn total(&self) -> usize {
        self.total
    }
}

impl fmt::Display for MemoryUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "heap: {}/{} bytes ({}%)",
            self.used,
            self.total,
            self.percent()
        )
    }
}

pub struct MemoryReport<C: TimeSource> {
    gate: IntervalGate<C>,
}

impl<C: TimeSource> MemoryReport<C> {
    pub fn new(clock: C, window: C::Tick) -> Self {
        Self {
            gate: IntervalGate::new(clock, window),
        }
    }

    /// Stats are only read when the window has closed.
    pub fn tick<S: MemoryStats + ?Sized>(&mut self, stats: &S) -> Option<MemoryUsage> {
        self.gate.ready().ok()?;
        Some(MemoryUsage {
            used: stats.used(),
            total: stats.total(),
        })
    }

    pub fn tick_to<S, W>(&mut self, stats: &S, sink: &mut W) -> fmt::Result
    where
        S: MemoryStats + ?Sized,
        W: fmt::Write,
    {
        match self.tick(stats) {
            Some(usage) => writeln!(sink, "{}", usage),
            None => Ok(()),
        }
    }
}
