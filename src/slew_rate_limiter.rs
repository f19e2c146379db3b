//! Slew rate limiter.
//!
//! Limits how fast a signal may change between successive samples. An
//! exponential moving average tracks the raw input, the pending change is
//! clamped to a fixed or adaptively widened envelope, and a hysteresis band
//! snaps small residual gaps shut so that noise is absorbed instead of crept
//! toward over several samples.

// Based on MIT-licensed code (c) 2023 by Andrew McKinnon

use num_traits::{FromPrimitive, PrimInt, Signed};

/// Internal EMA precision shift. All EMA arithmetic is carried with 10 bits
/// of scale so that every exponent up to [`SmoothingExponent::Window512`]
/// stays within native integer width.
pub const EMA_SHIFT: usize = 10;

/// The adaptive slope gain is held in 128ths, reducing the widening term to
/// a multiply and a shift.
pub const SLOPE_SHIFT: usize = 7;

/// Power-of-two code selecting the EMA weighting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum SmoothingExponent {
    Window1 = 0,
    Window2 = 1,
    Window4 = 2,
    Window8 = 3,
    #[default]
    Window16 = 4,
    Window32 = 5,
    Window64 = 6,
    Window128 = 7,
    Window256 = 8,
    Window512 = 9,
}

impl SmoothingExponent {
    /// Shift code of this window, 0 for [`Window1`](Self::Window1) up to 9
    /// for [`Window512`](Self::Window512).
    #[inline]
    pub fn shift(self) -> usize {
        self as usize
    }
}

/// Rate limiter with EMA smoothing, adaptive widening and hysteresis.
///
/// Call [`process`](Self::process) once per sample period from a single
/// context; one instance handles one scalar stream. The sample type is any
/// signed primitive integer, `i32` being the usual choice. The EMA carries
/// [`EMA_SHIFT`] extra bits of scale, so narrower types need matching
/// headroom above the signal range.
///
/// Configuration is taken as given: negative rate limits or bands are not
/// rejected and simply compute literally.
#[derive(Debug, Clone)]
pub struct SlewRateLimiter<T> {
    last_value: T,
    ema_value: T,
    first_call: bool,
    exponent: SmoothingExponent,
    rate_limit: T,
    hysteresis_band: T,
    adaptive_slope: T,
}

impl<T> Default for SlewRateLimiter<T>
where
    T: PrimInt + Signed + FromPrimitive + Default,
{
    fn default() -> Self {
        Self::new(
            SmoothingExponent::default(),
            T::from_i8(5).unwrap_or_default(),
            T::from_i8(2).unwrap_or_default(),
            T::zero(),
        )
    }
}

impl<T> SlewRateLimiter<T>
where
    T: PrimInt + Signed + FromPrimitive + Default,
{
    /// Creates a limiter with the given smoothing window, base rate limit,
    /// hysteresis band and adaptive slope percentage. A slope of 0 disables
    /// adaptive widening.
    pub fn new(
        exponent: SmoothingExponent,
        rate_limit: T,
        hysteresis_band: T,
        slope_percent: T,
    ) -> Self {
        let mut limiter = Self {
            last_value: T::zero(),
            ema_value: T::zero(),
            first_call: true,
            exponent,
            rate_limit,
            hysteresis_band,
            adaptive_slope: T::zero(),
        };
        limiter.set_adaptive_slope(slope_percent);

        limiter
    }

    /// Processes one input sample and returns the rate-limited output.
    ///
    /// The first call after construction or [`reset`](Self::reset) seeds the
    /// filter and returns the input unchanged, avoiding a rate-limited
    /// transient on startup.
    #[inline]
    pub fn process(&mut self, input: T) -> T {
        if self.first_call {
            self.last_value = input;
            self.ema_value = input;
            self.first_call = false;

            return input;
        }

        self.ema_value = update_ema(input, self.ema_value, self.exponent);

        let delta = input - self.last_value;
        let allowed = if self.adaptive_slope == T::zero() {
            self.rate_limit
        } else {
            self.rate_limit + ((delta.abs() * self.adaptive_slope) >> SLOPE_SHIFT)
        };

        if delta > allowed {
            self.last_value = self.last_value + allowed;
        } else if delta < -allowed {
            self.last_value = self.last_value - allowed;
        } else {
            self.last_value = input;
        }

        // Residual gaps within the hysteresis band are noise, taken over directly.
        if (input - self.last_value).abs() <= self.hysteresis_band {
            self.last_value = input;
        }

        self.last_value
    }

    /// Sets the base maximum change per sample. Takes effect on the next
    /// [`process`](Self::process) call.
    #[inline]
    pub fn set_rate_limit(&mut self, limit: T) {
        self.rate_limit = limit;
    }

    /// Sets the hysteresis band radius. Takes effect on the next
    /// [`process`](Self::process) call.
    #[inline]
    pub fn set_hysteresis_band(&mut self, band: T) {
        self.hysteresis_band = band;
    }

    /// Sets the EMA smoothing window. Takes effect on the next
    /// [`process`](Self::process) call.
    #[inline]
    pub fn set_smoothing_exponent(&mut self, exponent: SmoothingExponent) {
        self.exponent = exponent;
    }

    /// Sets the adaptive gain from a percentage of the pending change. The
    /// percentage is rescaled to 128ths once here; 0 disables adaptive
    /// widening.
    #[inline]
    pub fn set_adaptive_slope(&mut self, slope_percent: T) {
        let half = T::from_i8(50).unwrap_or_default();
        let hundred = T::from_i8(100).unwrap_or_default();
        self.adaptive_slope = ((slope_percent << SLOPE_SHIFT) + half) / hundred;
    }

    /// Discards all learned state. The next [`process`](Self::process) call
    /// seeds the filter from its input again.
    pub fn reset(&mut self) {
        self.first_call = true;
        self.last_value = T::zero();
        self.ema_value = T::zero();
    }

    /// Last emitted output sample.
    #[inline]
    pub fn last_value(&self) -> T {
        self.last_value
    }

    /// Current exponential moving average of the raw input.
    #[inline]
    pub fn ema_value(&self) -> T {
        self.ema_value
    }

    /// Whether the filter has processed its first sample since construction
    /// or [`reset`](Self::reset).
    #[inline]
    pub fn is_seeded(&self) -> bool {
        !self.first_call
    }
}

/// Advances an exponential moving average by one sample, with the weighting
/// selected by `exponent` and [`EMA_SHIFT`] bits of internal fixed-point
/// scale. Right shifts on signed values are arithmetic, so negative
/// deviations keep their sign.
#[inline]
pub fn update_ema<T>(new_value: T, current_ema: T, exponent: SmoothingExponent) -> T
where
    T: PrimInt + Signed,
{
    let k = exponent.shift();

    ((new_value << k) + (current_ema << EMA_SHIFT) - (current_ema << k)) >> EMA_SHIFT
}
