// Fixed-width tick counts
//
// Free-running counters wrap at their bit width. Elapsed time is always
// `now.wrapping_sub(earlier)`, never a comparison of absolute values,
// so a counter that rolls over from MAX to 0 still gates correctly.

use core::fmt;

/// Count conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// Value does not fit the tick width
    Overflow { value: u64, max: u64 },
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalError::Overflow { value, max } => {
                write!(f, "interval {} exceeds tick range (max {})", value, max)
            }
        }
    }
}

/// Unsigned counter type a time source reports in.
pub trait Tick: Copy + Ord + fmt::Debug + fmt::Display {
    const ZERO: Self;
    const MAX: Self;

    /// Modular `self - earlier`.
    fn elapsed_since(self, earlier: Self) -> Self;

    fn to_u64(self) -> u64;

    fn try_from_u64(value: u64) -> Result<Self, IntervalError>;
}

macro_rules! impl_tick {
    ($($ty:ty),*) => {
        $(
            impl Tick for $ty {
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn elapsed_since(self, earlier: Self) -> Self {
                    self.wrapping_sub(earlier)
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                fn try_from_u64(value: u64) -> Result<Self, IntervalError> {
                    <$ty>::try_from(value).map_err(|_| IntervalError::Overflow {
                        value,
                        max: <Self as Tick>::MAX.to_u64(),
                    })
                }
            }
        )*
    };
}

impl_tick!(u8, u16, u32, u64, usize);
