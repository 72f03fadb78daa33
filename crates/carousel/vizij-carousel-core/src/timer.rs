//! Host-clocked timers.
//!
//! The engine never reads a wall clock. The host advances time explicitly via
//! `Carousel::update(dt_ms, ..)`, and these timers report how many times they
//! fired within that span. Both are single-slot: re-arming replaces the pending
//! schedule, so two concurrent timers can never exist.

/// Periodic timer driving autoplay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntervalTimer {
    period_ms: f64,
    elapsed_ms: f64,
    running: bool,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer with a fresh period, discarding any partially elapsed one.
    pub fn start(&mut self, period_ms: f64) {
        self.period_ms = period_ms;
        self.elapsed_ms = 0.0;
        self.running = period_ms.is_finite() && period_ms > 0.0;
    }

    /// Disarm. Returns `true` if the timer was running. Idempotent.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.elapsed_ms = 0.0;
        was_running
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance by `dt_ms` and return how many periods completed, saturating at
    /// `u32::MAX`. Non-finite or non-positive steps are ignored.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.running || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < self.period_ms {
            return 0;
        }
        let periods = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms = (self.elapsed_ms - periods * self.period_ms).clamp(0.0, self.period_ms);
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms = 0.0;
        }
        // `as` saturates float-to-int conversions.
        periods as u32
    }
}

/// Single-slot cancellable one-shot timer used to debounce resize bursts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebounceTimer {
    remaining_ms: Option<f64>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fire after `delay_ms`, cancelling any pending schedule.
    pub fn schedule(&mut self, delay_ms: f64) {
        self.remaining_ms = Some(delay_ms.max(0.0));
    }

    /// Cancel the pending fire, if any. Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining_ms.take().is_some()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Advance by `dt_ms`; returns `true` exactly once when the quiet period has elapsed.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        match self.remaining_ms.as_mut() {
            Some(remaining) => {
                *remaining -= dt_ms.max(0.0);
                if *remaining <= 0.0 {
                    self.remaining_ms = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}
