// Elapsed-time gating for cooperative control loops.
//
// "Run this no more often than every N ticks" without blocking: each
// poll compares the clock against the last fire time (wrap-safe) and
// runs the supplied closure only when the interval has passed.
//
//     let mut blink = IntervalGate::new(EmbassyMillis, 500);
//     loop {
//         blink.poll(|| led.toggle());
//         ...
//     }

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod diag;
#[cfg(feature = "embassy")]
pub mod embassy;
pub mod gate;
pub mod shared;
pub mod tick;

pub use clock::{BoundClock, CounterClock, ManualClock, TickCounter, TimeSource};
pub use gate::{FirstFire, GateConfig, IntervalGate};
pub use shared::SharedGate;
pub use tick::{IntervalError, Tick};

#[cfg(feature = "embassy")]
pub use embassy::{EmbassyMicros, EmbassyMillis, MicrosGate, MillisGate};
