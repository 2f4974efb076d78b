// Loop iteration rate: count polls, report once per window.

use core::fmt;

use crate::clock::TimeSource;
use crate::gate::IntervalGate;
use crate::tick::Tick;

pub struct LoopRate<C: TimeSource> {
    gate: IntervalGate<C>,
    iterations: u32,
}

impl<C: TimeSource> LoopRate<C> {
    pub fn new(clock: C, window: C::Tick) -> Self {
        Self {
            gate: IntervalGate::new(clock, window),
            iterations: 0,
        }
    }

    /// Count one loop iteration. Returns a report when the window closes.
    pub fn tick(&mut self) -> Option<LoopRateReport> {
        self.iterations = self.iterations.saturating_add(1);

        self.gate.ready().ok()?;
        let report = LoopRateReport {
            iterations: self.iterations,
            window: self.gate.interval().to_u64(),
        };
        self.iterations = 0;
        Some(report)
    }

    pub fn tick_to<W: fmt::Write>(&mut self, sink: &mut W) -> fmt::Result {
        match self.tick() {
            Some(report) => writeln!(sink, "{}", report),
            None => Ok(()),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn gate(&mut self) -> &mut IntervalGate<C> {
        &mut self.gate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopRateReport {
    pub iterations: u32,
    pub window: u64,
}

impl LoopRateReport {
    // ticks per iteration
    pub fn average_loop_time(&self) -> u64 {
        self.window / u64::from(self.iterations.max(1))
    }
}

// Rendered for microsecond ticks over a one second window.
impl fmt::Display for LoopRateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iter/sec: {} ({} us average loop time)",
            self.iterations,
            self.average_loop_time()
        )
    }
}
