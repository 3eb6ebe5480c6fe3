//! Proportional and proportional-integral feedback laws
//!
//! The integral term follows the motor test-bench convention
//! `integral += error / (dt·ki)`, so a larger `ki` means a slower integrator.

use serde::{Deserialize, Serialize};
use simcore::{Model, SimError, ensure_time_step};

/// Proportional control law `kp·(desired − actual)`.
pub fn proportional(kp: f64, desired: f64, actual: f64) -> f64 {
    kp * (desired - actual)
}

/// Configuration for a P or PI controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiConfig {
    /// Proportional gain
    pub kp: f64,
    /// Integral divisor; `None` disables the integral term
    pub ki: Option<f64>,
}

impl Default for PiConfig {
    fn default() -> Self {
        Self { kp: 20.0, ki: Some(60.0) }
    }
}

impl PiConfig {
    /// Create a P-only controller
    pub fn p(kp: f64) -> Self {
        Self { kp, ki: None }
    }

    /// Create a PI controller
    pub fn pi(kp: f64, ki: f64) -> Self {
        Self { kp, ki: Some(ki) }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.kp.is_finite() {
            return Err(SimError::InvalidParameter { name: "kp", value: self.kp });
        }
        match self.ki {
            Some(ki) if !ki.is_finite() || ki == 0.0 => {
                Err(SimError::InvalidParameter { name: "ki", value: ki })
            }
            _ => Ok(()),
        }
    }
}

/// PI controller with state
///
/// The accumulator persists across `update` calls and is cleared by
/// `reset`; one controller instance serves one simulation run.
#[derive(Debug, Clone)]
pub struct PiController {
    config: PiConfig,
    integral: f64,
}

impl PiController {
    pub fn new(config: PiConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config, integral: 0.0 })
    }

    /// Update with a new measurement and return the control output
    pub fn update(&mut self, desired: f64, actual: f64, dt: f64) -> Result<f64, SimError> {
        let error = desired - actual;
        if let Some(ki) = self.config.ki {
            let dt = ensure_time_step(dt)?;
            self.integral += error / (dt * ki);
        }
        Ok(self.config.kp * error + self.integral)
    }

    /// Get the current integral accumulator value
    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn config(&self) -> &PiConfig {
        &self.config
    }
}

impl Model for PiController {
    fn reset(&mut self) {
        self.integral = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_proportional_output() {
        assert_relative_eq!(proportional(2.0, 10.0, 4.0), 12.0);
        assert_relative_eq!(proportional(150.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_p_only_has_no_integral() {
        let mut ctrl = PiController::new(PiConfig::p(3.0)).unwrap();
        for _ in 0..10 {
            let out = ctrl.update(1.0, 0.5, 0.01).unwrap();
            assert_relative_eq!(out, 1.5);
        }
        assert_eq!(ctrl.integral(), 0.0);
    }

    #[test]
    fn test_integral_divides_by_dt_and_ki() {
        let mut ctrl = PiController::new(PiConfig::pi(20.0, 60.0)).unwrap();
        let out = ctrl.update(1.0, 0.0, 0.01).unwrap();
        // integral = 1 / (0.01 * 60)
        let expected_integral = 1.0 / 0.6;
        assert_relative_eq!(ctrl.integral(), expected_integral, epsilon = 1e-12);
        assert_relative_eq!(out, 20.0 + expected_integral, epsilon = 1e-12);

        ctrl.update(1.0, 0.5, 0.01).unwrap();
        assert_relative_eq!(ctrl.integral(), expected_integral * 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut ctrl = PiController::new(PiConfig::pi(1.0, 1.0)).unwrap();
        for _ in 0..10 {
            ctrl.update(10.0, 0.0, 0.1).unwrap();
        }
        assert!(ctrl.integral() > 0.0);

        ctrl.reset();
        assert_eq!(ctrl.integral(), 0.0);
    }

    #[test]
    fn test_rejects_zero_ki_and_bad_dt() {
        assert_eq!(
            PiController::new(PiConfig::pi(1.0, 0.0)).unwrap_err(),
            SimError::InvalidParameter { name: "ki", value: 0.0 }
        );

        let mut ctrl = PiController::new(PiConfig::pi(1.0, 1.0)).unwrap();
        assert_eq!(ctrl.update(1.0, 0.0, 0.0).unwrap_err(), SimError::InvalidTimeStep(0.0));
        assert_eq!(ctrl.integral(), 0.0);
    }
}
