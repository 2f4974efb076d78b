// Time sources
//
// A gate only needs "what time is it" as a tick count. Anything that
// answers that is a TimeSource:
//
//   • a fn item (`micros`)          : zero-sized, static dispatch
//   • a fn pointer (`fn() -> u32`)  : nameable, usable in statics
//   • a closure                     : captures whatever it needs
//   • BoundClock                    : method on a borrowed owner
//   • CounterClock                  : ISR-advanced TickCounter
//   • ManualClock                   : host tests and simulation

use core::cell::Cell;

use crate::tick::Tick;

pub trait TimeSource {
    type Tick: Tick;

    fn now(&self) -> Self::Tick;
}

impl<F, T> TimeSource for F
where
    F: Fn() -> T,
    T: Tick,
{
    type Tick = T;

    #[inline]
    fn now(&self) -> T {
        self()
    }
}

/// Clock read through a method of an owner the gate borrows.
///
/// The gate holding this cannot outlive `owner`.
pub struct BoundClock<'a, O: ?Sized, T> {
    owner: &'a O,
    read: fn(&O) -> T,
}

impl<'a, O: ?Sized, T> BoundClock<'a, O, T> {
    pub const fn new(owner: &'a O, read: fn(&O) -> T) -> Self {
        Self { owner, read }
    }

    pub fn owner(&self) -> &'a O {
        self.owner
    }
}

impl<O: ?Sized, T> Clone for BoundClock<'_, O, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized, T> Copy for BoundClock<'_, O, T> {}

impl<O: ?Sized, T: Tick> TimeSource for BoundClock<'_, O, T> {
    type Tick = T;

    #[inline]
    fn now(&self) -> T {
        (self.read)(self.owner)
    }
}

/// Hand-driven clock. Single context only.
#[derive(Debug, Default)]
pub struct ManualClock<T: Tick> {
    now: Cell<T>,
}

impl<T: Tick> ManualClock<T> {
    pub const fn new(start: T) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, t: T) {
        self.now.set(t);
    }

    // wraps like the hardware counter it stands in for
    pub fn advance(&self, by: T) {
        let t = self.now.get();
        // a - (0 - b) == a + b, modular
        self.now.set(t.elapsed_since(T::ZERO.elapsed_since(by)));
    }

    pub fn get(&self) -> T {
        self.now.get()
    }
}

impl<T: Tick> TimeSource for ManualClock<T> {
    type Tick = T;

    #[inline]
    fn now(&self) -> T {
        self.now.get()
    }
}

impl<T: Tick> TimeSource for &ManualClock<T> {
    type Tick = T;

    #[inline]
    fn now(&self) -> T {
        self.now.get()
    }
}

// Uptime counter advanced from a timer interrupt.
// cs: targets like riscv32imc have no atomic RMW.
pub struct TickCounter {
    ticks: critical_section::Mutex<Cell<u32>>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: critical_section::Mutex::new(Cell::new(0)),
        }
    }

    #[inline]
    pub fn advance(&self, by: u32) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(by));
        });
    }

    pub fn set(&self, ticks: u32) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(ticks));
    }

    pub fn now(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    pub const fn clock(&self) -> CounterClock<'_> {
        CounterClock { counter: self }
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct CounterClock<'a> {
    counter: &'a TickCounter,
}

impl TimeSource for CounterClock<'_> {
    type Tick = u32;

    #[inline]
    fn now(&self) -> u32 {
        self.counter.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Board {
        micros: Cell<u32>,
    }

    impl Board {
        fn micros(&self) -> u32 {
            self.micros.get()
        }
    }

    fn fixed() -> u16 {
        42
    }

    #[test]
    fn fn_item_is_a_time_source() {
        assert_eq!(fixed.now(), 42);
    }

    #[test]
    fn fn_pointer_is_a_time_source() {
        let f: fn() -> u16 = fixed;
        assert_eq!(f.now(), 42);
    }

    #[test]
    fn closure_is_a_time_source() {
        let base = Cell::new(7u8);
        let clock = || base.get();
        assert_eq!(clock.now(), 7);
        base.set(9);
        assert_eq!(clock.now(), 9);
    }

    #[test]
    fn bound_clock_reads_owner() {
        let board = Board {
            micros: Cell::new(1_000),
        };
        let clock = BoundClock::new(&board, Board::micros);
        assert_eq!(clock.now(), 1_000);
        board.micros.set(2_500);
        assert_eq!(clock.now(), 2_500);
    }

    #[test]
    fn manual_clock_advance_wraps() {
        let clock = ManualClock::new(250u8);
        clock.advance(10);
        assert_eq!(clock.get(), 4);
    }

    #[test]
    fn tick_counter_advances_and_wraps() {
        let counter = TickCounter::new();
        counter.set(u32::MAX - 1);
        counter.advance(3);
        assert_eq!(counter.now(), 1);
        assert_eq!(counter.clock().now(), 1);
    }
}
