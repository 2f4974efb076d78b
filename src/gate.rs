// Elapsed-time gate
//
// Poll once per loop iteration. The gate samples its clock, and if at
// least `interval` ticks have passed since it last fired, records the
// new timestamp and runs the supplied work. Otherwise nothing changes.
//
// Timestamp is written *before* the work runs, so long or reentrant
// work never sees a stale `last_fire`.

use core::convert::Infallible;

use log::{debug, trace};

use crate::clock::TimeSource;
use crate::tick::Tick;

/// What the first poll after construction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstFire {
    /// Wait one full interval from construction.
    #[default]
    AfterInterval,
    /// Fire on the first poll, then gate normally.
    Immediately,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig<T: Tick> {
    pub interval: T,
    pub first_fire: FirstFire,
}

impl<T: Tick> GateConfig<T> {
    pub const fn every(interval: T) -> Self {
        Self {
            interval,
            first_fire: FirstFire::AfterInterval,
        }
    }

    pub const fn first_fire(mut self, first_fire: FirstFire) -> Self {
        self.first_fire = first_fire;
        self
    }

    pub const fn immediately(self) -> Self {
        self.first_fire(FirstFire::Immediately)
    }
}

pub struct IntervalGate<C: TimeSource> {
    clock: C,
    interval: C::Tick,
    last_fire: C::Tick,
    first_fire_pending: bool,
}

impl<C: TimeSource> IntervalGate<C> {
    /// Gate that first fires `interval` ticks after construction.
    pub fn new(clock: C, interval: C::Tick) -> Self {
        Self::with_config(clock, GateConfig::every(interval))
    }

    pub fn with_config(clock: C, config: GateConfig<C::Tick>) -> Self {
        let now = clock.now();
        Self {
            clock,
            interval: config.interval,
            last_fire: now,
            first_fire_pending: config.first_fire == FirstFire::Immediately,
        }
    }

    /// Gate with an explicit start timestamp; does not touch the clock,
    /// so it can initialise a `static`.
    pub const fn starting_at(clock: C, interval: C::Tick, last_fire: C::Tick) -> Self {
        Self {
            clock,
            interval,
            last_fire,
            first_fire_pending: false,
        }
    }

    #[inline]
    pub fn set_interval(&mut self, interval: C::Tick) {
        if interval != self.interval {
            debug!("gate: interval {} -> {}", self.interval, interval);
        }
        self.interval = interval;
    }

    #[inline]
    pub fn interval(&self) -> C::Tick {
        self.interval
    }

    #[inline]
    pub fn last_fire(&self) -> C::Tick {
        self.last_fire
    }

    /// Ticks since the last fire, read fresh from the clock.
    pub fn elapsed(&self) -> C::Tick {
        self.clock.now().elapsed_since(self.last_fire)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Fire decision only. `Ok(now)` means the gate fired and
    /// `last_fire == now`; `WouldBlock` means nothing changed.
    #[inline]
    pub fn ready(&mut self) -> nb::Result<C::Tick, Infallible> {
        let now = self.clock.now();

        if !self.first_fire_pending && now.elapsed_since(self.last_fire) < self.interval {
            return Err(nb::Error::WouldBlock);
        }

        self.last_fire = now;
        self.first_fire_pending = false;
        trace!("gate: fired at {}", now);
        Ok(now)
    }

    /// Run `work` if the interval has elapsed. Returns whether it ran.
    #[inline]
    pub fn poll<F: FnOnce()>(&mut self, work: F) -> bool {
        match self.ready() {
            Ok(_) => {
                work();
                true
            }
            Err(_) => false,
        }
    }

    /// Like [`poll`](Self::poll), but `work` gets the gate back so it can
    /// retune its own cadence. A new interval applies from the next poll.
    #[inline]
    pub fn poll_with<F: FnOnce(&mut Self)>(&mut self, work: F) -> bool {
        match self.ready() {
            Ok(_) => {
                work(self);
                true
            }
            Err(_) => false,
        }
    }

    /// Spin until the gate fires. Never returns if the clock is stopped.
    pub fn block(&mut self) -> C::Tick {
        match nb::block!(self.ready()) {
            Ok(now) => now,
            Err(never) => match never {},
        }
    }
}
