// Duty cycle: busy ticks inside a window, as a percentage of the window.
// Does not count its own overhead, so expect the figure to read a bit low.

use core::fmt;

use crate::clock::TimeSource;
use crate::gate::IntervalGate;
use crate::tick::Tick;

pub struct DutyCycle<C: TimeSource> {
    gate: IntervalGate<C>,
    busy: u64,
}

impl<C: TimeSource> DutyCycle<C> {
    pub fn new(clock: C, window: C::Tick) -> Self {
        Self {
            gate: IntervalGate::new(clock, window),
            busy: 0,
        }
    }

    /// Add the span `start..end` (clock ticks, wrap-safe) to the busy total.
    pub fn record(&mut self, start: C::Tick, end: C::Tick) {
        self.busy = self.busy.saturating_add(end.elapsed_since(start).to_u64());
    }

    /// Time `work` on the gate's own clock and record it.
    pub fn measure<R>(&mut self, work: impl FnOnce() -> R) -> R {
        let start = self.gate.clock().now();
        let out = work();
        let end = self.gate.clock().now();
        self.record(start, end);
        out
    }

    pub fn tick(&mut self) -> Option<LoadReport> {
        self.gate.ready().ok()?;
        let report = LoadReport {
            busy: self.busy,
            window: self.gate.interval().to_u64(),
        };
        self.busy = 0;
        Some(report)
    }

    pub fn tick_to<W: fmt::Write>(&mut self, sink: &mut W) -> fmt::Result {
        match self.tick() {
            Some(report) => writeln!(sink, "{}", report),
            None => Ok(()),
        }
    }

    pub fn busy(&self) -> u64 {
        self.busy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub busy: u64,
    pub window: u64,
}

impl LoadReport {
    /// Load in hundredths of a percent (10_000 == 100%).
    pub fn basis_points(&self) -> u64 {
        if self.window == 0 {
            return 0;
        }
        self.busy.saturating_mul(10_000) / self.window
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bp = self.basis_points();
        write!(f, "Load: {}.{:02}%", bp / 100, bp % 100)
    }
}
