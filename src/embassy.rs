// embassy-time backed clocks
//
// Truncated to u32 like a free-running hardware counter: micros wrap
// after ~71.6 minutes, millis after ~49.7 days. Gates handle the wrap.
// Needs a time driver linked into the firmware (esp-rtos, embassy-rp, ...).

use embassy_time::{Duration, Instant};

use crate::clock::TimeSource;
use crate::gate::{FirstFire, GateConfig, IntervalGate};
use crate::tick::{IntervalError, Tick};

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyMicros;

impl TimeSource for EmbassyMicros {
    type Tick = u32;

    #[inline]
    fn now(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyMillis;

impl TimeSource for EmbassyMillis {
    type Tick = u32;

    #[inline]
    fn now(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

pub type MicrosGate = IntervalGate<EmbassyMicros>;
pub type MillisGate = IntervalGate<EmbassyMillis>;

pub fn micros_interval(period: Duration) -> Result<u32, IntervalError> {
    u32::try_from_u64(period.as_micros())
}

pub fn millis_interval(period: Duration) -> Result<u32, IntervalError> {
    u32::try_from_u64(period.as_millis())
}

impl IntervalGate<EmbassyMicros> {
    pub fn every(period: Duration) -> Result<Self, IntervalError> {
        Ok(Self::new(EmbassyMicros, micros_interval(period)?))
    }

    pub fn every_with(period: Duration, first_fire: FirstFire) -> Result<Self, IntervalError> {
        let config = GateConfig::every(micros_interval(period)?).first_fire(first_fire);
        Ok(Self::with_config(EmbassyMicros, config))
    }
}

impl IntervalGate<EmbassyMillis> {
    pub fn every(period: Duration) -> Result<Self, IntervalError> {
        Ok(Self::new(EmbassyMillis, millis_interval(period)?))
    }

    pub fn every_with(period: Duration, first_fire: FirstFire) -> Result<Self, IntervalError> {
        let config = GateConfig::every(millis_interval(period)?).first_fire(first_fire);
        Ok(Self::with_config(EmbassyMillis, config))
    }
}
