//! Loop diagnostics built on [`IntervalGate`](crate::IntervalGate).
//!
//! Each helper owns its gate and accumulator explicitly; nothing is kept
//! in hidden statics. Reports implement `Display`, so they can go to any
//! `fmt::Write` sink (UART, [`LineBuf`]) or straight to `log`:
//!
//! ```
//! use core::cell::Cell;
//! use interval_gate::diag::{defaults, LoopRate};
//!
//! let now = Cell::new(0u32);
//! let mut rate = LoopRate::new(|| now.get(), defaults::RATE_WINDOW_US);
//!
//! for _ in 0..4 {
//!     now.set(now.get() + 250_000);
//!     if let Some(report) = rate.tick() {
//!         log::info!("{}", report);
//!         assert_eq!(report.iterations, 4);
//!     }
//! }
//! ```

pub mod line;
pub mod load;
pub mod memory;
pub mod rate;

pub use line::LineBuf;
pub use load::{DutyCycle, LoadReport};
pub use memory::{MemoryReport, MemoryStats, MemoryUsage};
pub use rate::{LoopRate, LoopRateReport};

/// Report windows in microseconds.
pub mod defaults {
    pub const RATE_WINDOW_US: u32 = 1_000_000;
    pub const LOAD_WINDOW_US: u32 = 1_000_000;
    pub const MEMORY_WINDOW_US: u32 = 3_000_000;
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::fmt::Write;

    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn loop_rate_reports_and_resets() {
        let clock = ManualClock::new(0u32);
        let mut rate = LoopRate::new(&clock, defaults::RATE_WINDOW_US);

        for _ in 0..399 {
            clock.advance(2_500);
            assert_eq!(rate.tick(), None);
        }
        clock.advance(2_500);
        let report = rate.tick().unwrap();
        assert_eq!(report.iterations, 400);
        assert_eq!(report.average_loop_time(), 2_500);
        assert_eq!(rate.iterations(), 0);

        let mut line = LineBuf::<64>::new();
        write!(line, "{}", report).unwrap();
        assert_eq!(line.as_str(), "iter/sec: 400 (2500 us average loop time)");
    }

    #[test]
    fn duty_cycle_reports_percentage() {
        let clock = ManualClock::new(0u32);
        let mut load = DutyCycle::new(&clock, defaults::LOAD_WINDOW_US);

        load.record(100, 250_100);
        load.record(u32::MAX - 4_999, 120_000);
        assert_eq!(load.busy(), 375_000);

        clock.set(1_000_000);
        let mut line = LineBuf::<32>::new();
        load.tick_to(&mut line).unwrap();
        assert_eq!(line.as_str(), "Load: 37.50%\n");
        assert_eq!(load.busy(), 0);
    }

    #[test]
    fn duty_cycle_measures_on_own_clock() {
        let t = Cell::new(0u32);
        let clock = || {
            t.set(t.get() + 10);
            t.get()
        };
        let mut load = DutyCycle::new(clock, 1_000);
        let out = load.measure(|| 7);
        assert_eq!(out, 7);
        assert_eq!(load.busy(), 10);
    }

    #[test]
    fn memory_report_reads_stats_on_fire_only() {
        struct Heap {
            reads: Cell<u32>,
        }

        impl MemoryStats for Heap {
            fn used(&self) -> usize {
                self.reads.set(self.reads.get() + 1);
                64_000
            }

            fn total(&self) -> usize {
                256_000
            }
        }

        let heap = Heap {
            reads: Cell::new(0),
        };
        let clock = ManualClock::new(0u32);
        let mut mem = MemoryReport::new(&clock, defaults::MEMORY_WINDOW_US);

        clock.set(2_999_999);
        assert_eq!(mem.tick(&heap), None);
        assert_eq!(heap.reads.get(), 0);

        clock.set(3_000_000);
        let usage = mem.tick(&heap).unwrap();
        assert_eq!(heap.reads.get(), 1);
        assert_eq!(usage.percent(), 25);

        let mut line = LineBuf::<48>::new();
        write!(line, "{}", usage).unwrap();
        assert_eq!(line.as_str(), "heap: 64000/256000 bytes (25%)");
    }
}
