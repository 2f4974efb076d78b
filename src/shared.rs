// Gate shared between execution contexts (main loop + ISR, or two
// cores). The read-compare-update runs inside one critical section;
// the work itself runs after it is released so interrupts are not
// held off for the length of the job.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::clock::TimeSource;
use crate::gate::IntervalGate;

pub struct SharedGate<C: TimeSource> {
    inner: Mutex<RefCell<IntervalGate<C>>>,
}

impl<C: TimeSource> SharedGate<C> {
    pub const fn new(gate: IntervalGate<C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(gate)),
        }
    }

    pub fn poll<F: FnOnce()>(&self, work: F) -> bool {
        let fired = critical_section::with(|cs| self.inner.borrow_ref_mut(cs).ready().is_ok());
        if fired {
            work();
        }
        fired
    }

    pub fn set_interval(&self, interval: C::Tick) {
        self.with(|gate| gate.set_interval(interval));
    }

    pub fn interval(&self) -> C::Tick {
        self.with(|gate| gate.interval())
    }

    pub fn last_fire(&self) -> C::Tick {
        self.with(|gate| gate.last_fire())
    }

    // f must not touch this SharedGate again (nested borrow panics)
    pub fn with<R>(&self, f: impl FnOnce(&mut IntervalGate<C>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
