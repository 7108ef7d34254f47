use crate::error::Error;
use std::time::Instant;

/// Timestamp source for frames, in seconds. Called once per frame.
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Wall time since construction, for live sources.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Video time for recorded sources: every call is one frame later.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    ticks: u64,
}

impl FixedStepClock {
    pub fn new(step_sec: f64) -> Result<Self, Error> {
        if !(step_sec.is_finite() && step_sec > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "clock step must be positive, got {}",
                step_sec
            )));
        }

        Ok(Self {
            step: step_sec,
            ticks: 0,
        })
    }

    pub fn from_fps(fps: f64) -> Result<Self, Error> {
        Self::new(1.0 / fps)
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for FixedStepClock {
    #[inline]
    fn now(&mut self) -> f64 {
        let ts = self.ticks as f64 * self.step;
        self.ticks += 1;
        ts
    }
}
