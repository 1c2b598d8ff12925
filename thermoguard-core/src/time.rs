//! Time management for the control loop
//!
//! Microcontrollers expose a free-running millisecond counter (`millis()`
//! on Arduino, a SysTick counter elsewhere) that wraps after ~49.7 days.
//! The scheduler therefore works on `u32` milliseconds with wrapping
//! arithmetic, and every time source here reports that counter.

/// Milliseconds since device boot, wrapping at `u32::MAX`
pub type Millis = u32;

/// Source of time for the control loop
pub trait TimeSource {
    /// Get the current millisecond counter
    fn now_ms(&self) -> Millis;
}

/// Milliseconds elapsed from `earlier` to `later`, correct across one wrap
#[inline]
pub fn elapsed_ms(earlier: Millis, later: Millis) -> Millis {
    later.wrapping_sub(earlier)
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Millis,
}

impl FixedTime {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Millis) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`
    pub fn set(&mut self, timestamp: Millis) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`, wrapping
    pub fn advance(&mut self, ms: Millis) {
        self.timestamp = self.timestamp.wrapping_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now_ms(&self) -> Millis {
        self.timestamp
    }
}

/// Monotonic counter started at construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Clock counting from now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> Millis {
        // Truncation reproduces the wrap of a hardware counter
        self.start.elapsed().as_millis() as Millis
    }
}
