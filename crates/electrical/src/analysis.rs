//! Closed-form motor characteristics
//!
//! Steady-state and first-order step-response quantities derived from the
//! motor constants under the zero-inductance assumption.

use crate::motor::MotorConstant;

/// Data point for a steady-state operating curve
#[derive(Debug, Clone, Copy)]
pub struct OperatingPoint {
    pub voltage: f64,
    pub velocity_rad_s: f64,
    pub current_a: f64,
    pub torque_nm: f64,
}

impl MotorConstant {
    fn damping(&self) -> f64 {
        self.back_emf_constant * self.torque_constant + self.resistance * self.viscous_friction
    }

    /// Static gain K (rad/s per V): `kc / (ke·kc + R·f)`
    pub fn static_gain(&self) -> f64 {
        self.torque_constant / self.damping()
    }

    /// Mechanical time constant tau (s): `R·J / (ke·kc + R·f)`
    pub fn time_constant(&self) -> f64 {
        self.resistance * self.inertia / self.damping()
    }

    /// Speed reached under a constant voltage once transients have died out.
    pub fn steady_state_speed(&self, voltage: f64) -> f64 {
        self.static_gain() * voltage
    }

    /// Current drawn at steady state under a constant voltage.
    pub fn steady_state_current(&self, voltage: f64) -> f64 {
        (voltage - self.back_emf_constant * self.steady_state_speed(voltage)) / self.resistance
    }

    pub fn stall_current(&self, voltage: f64) -> f64 {
        voltage / self.resistance
    }

    pub fn stall_torque(&self, voltage: f64) -> f64 {
        self.torque_constant * self.stall_current(voltage)
    }

    /// First-order step response `K·(1 − e^(−t/tau))·U` at absolute time `t`.
    pub fn analytical_speed(&self, t: f64, voltage: f64) -> f64 {
        self.static_gain() * (1.0 - (-t / self.time_constant()).exp()) * voltage
    }

    /// Steady-state operating point at a given voltage.
    pub fn operating_point(&self, voltage: f64) -> OperatingPoint {
        let current = self.steady_state_current(voltage);
        OperatingPoint {
            voltage,
            velocity_rad_s: self.steady_state_speed(voltage),
            current_a: current,
            torque_nm: self.torque_constant * current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_motor_gain_and_time_constant() {
        let motor = MotorConstant::default();
        // 0.01 / (0.0001 + 0.1)
        assert_relative_eq!(motor.static_gain(), 0.01 / 0.1001, epsilon = 1e-12);
        assert_relative_eq!(motor.time_constant(), 0.01 / 0.1001, epsilon = 1e-12);
    }

    #[test]
    fn test_analytical_speed_limits() {
        let motor = MotorConstant::default();
        assert_eq!(motor.analytical_speed(0.0, 1.0), 0.0);
        assert_relative_eq!(
            motor.analytical_speed(100.0, 3.0),
            motor.steady_state_speed(3.0),
            epsilon = 1e-12
        );

        // One time constant reaches 1 - 1/e of the final value
        let tau = motor.time_constant();
        let ratio = motor.analytical_speed(tau, 1.0) / motor.static_gain();
        assert_relative_eq!(ratio, 1.0 - (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_operating_point_torque_balances_friction() {
        let motor = MotorConstant::default();
        let op = motor.operating_point(12.0);
        // At steady state motor torque equals viscous friction torque
        assert_relative_eq!(
            op.torque_nm,
            motor.viscous_friction * op.velocity_rad_s,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_stall_values() {
        let motor = MotorConstant::default().with_resistance(2.0);
        assert_relative_eq!(motor.stall_current(12.0), 6.0);
        assert_relative_eq!(motor.stall_torque(12.0), 0.06, epsilon = 1e-12);
    }
}
