use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic elapsed-time source, in seconds.
///
/// Time is zero until [`Clock::start`] is called and never decreases after.
pub trait Clock {
    /// Mark the start of time. Calling it again has no effect.
    fn start(&mut self);

    /// Seconds elapsed since [`Clock::start`].
    fn elapsed(&mut self) -> f32;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock {
    started: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn start(&mut self) {
        self.started.get_or_insert_with(Instant::now);
    }

    fn elapsed(&mut self) -> f32 {
        self.started
            .map(|s| s.elapsed().as_secs_f32())
            .unwrap_or(0.0)
    }
}

/// Advances by a fixed timestep on every read: `0, dt, 2·dt, ...`.
///
/// Each value is computed from the read count rather than accumulated, so
/// long runs do not drift.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    dt: f32,
    reads: u64,
    started: bool,
}

impl FixedStepClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            reads: 0,
            started: false,
        }
    }
}

impl Clock for FixedStepClock {
    fn start(&mut self) {
        self.started = true;
    }

    fn elapsed(&mut self) -> f32 {
        if !self.started {
            return 0.0;
        }
        let t = (self.reads as f64 * self.dt as f64) as f32;
        self.reads += 1;
        t
    }
}

/// Externally driven clock. Clones share the same time value, so a test can
/// keep a handle while the driver owns the clock.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `t`. Earlier values are ignored so time stays monotonic.
    pub fn set(&self, t: f32) {
        if t > self.now.get() {
            self.now.set(t);
        }
    }

    pub fn advance(&self, dt: f32) {
        self.set(self.now.get() + dt.max(0.0));
    }

    pub fn now(&self) -> f32 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {}

    fn elapsed(&mut self) -> f32 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_zero_before_start() {
        let mut c = SystemClock::new();
        assert_eq!(c.elapsed(), 0.0);
        c.start();
        let a = c.elapsed();
        let b = c.elapsed();
        assert!(b >= a);
    }

    #[test]
    fn fixed_step_clock_counts_reads() {
        let mut c = FixedStepClock::new(0.1);
        c.start();
        let ts: Vec<f32> = (0..4).map(|_| c.elapsed()).collect();
        assert_eq!(ts[0], 0.0);
        assert!((ts[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn fixed_step_clock_does_not_drift() {
        let mut c = FixedStepClock::new(0.1);
        c.start();
        let mut last = 0.0;
        for _ in 0..100 {
            last = c.elapsed();
        }
        assert!((last - 9.9).abs() < 1e-5);
    }

    #[test]
    fn manual_clock_is_monotonic_and_shared() {
        let handle = ManualClock::new();
        let mut owned = handle.clone();
        handle.set(2.0);
        handle.set(1.0);
        assert_eq!(owned.elapsed(), 2.0);
        handle.advance(0.5);
        assert_eq!(owned.elapsed(), 2.5);
    }
}
