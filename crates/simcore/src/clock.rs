use crate::error::{SimError, ensure_time_step};
use crate::traits::SimContext;

/// Fixed-step time loop from `t = 0` until the accumulated time reaches
/// `duration`.
///
/// Time is accumulated by repeated addition of `dt`, so the tick count for a
/// given pair follows floating-point summation rather than `duration / dt`.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    dt: f64,
    duration: f64,
}

impl FixedStepClock {
    pub fn new(dt: f64, duration: f64) -> Result<Self, SimError> {
        let dt = ensure_time_step(dt)?;
        if !duration.is_finite() || duration < 0.0 {
            return Err(SimError::InvalidDuration(duration));
        }
        Ok(FixedStepClock { dt, duration })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of ticks `run` performs.
    pub fn ticks(&self) -> usize {
        let mut ticks = 0;
        let mut t = 0.0;
        while t < self.duration {
            t += self.dt;
            ticks += 1;
        }
        ticks
    }

    /// Runs `tick` once per step and returns the time samples, starting at 0
    /// and ending at the first accumulated time `>= duration`.
    pub fn run<F>(&self, mut tick: F) -> Result<Vec<f64>, SimError>
    where
        F: FnMut(SimContext) -> Result<(), SimError>,
    {
        let mut times = vec![0.0];
        let mut t = 0.0;
        while t < self.duration {
            tick(SimContext { dt: self.dt, t })?;
            t += self.dt;
            times.push(t);
        }
        Ok(times)
    }
}
