//! Motor test bench
//!
//! Owns a set of named DC motors and drives one of them at a time through a
//! fixed-step run, open loop or under P/PI speed control. Every tick records
//! the closed-form reference speed alongside the numerical one.

use control::{PiConfig, PiController, proportional};
use electrical::DcMotor;
use log::debug;
use serde::{Deserialize, Serialize};
use simcore::{FixedStepClock, Registry, SimError};

/// How the input voltage is produced during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MotorCommand {
    /// Constant voltage, inductance neglected
    OpenLoop { voltage: f64 },
    /// Constant voltage, inductive electrical equation
    OpenLoopInductive { voltage: f64 },
    /// Speed setpoint under proportional control
    Proportional { setpoint: f64, kp: f64 },
    /// Speed setpoint under PI control
    ProportionalIntegral { setpoint: f64, kp: f64, ki: f64 },
}

impl MotorCommand {
    fn uses_inductance(&self) -> bool {
        matches!(self, MotorCommand::OpenLoopInductive { .. })
    }

    fn voltage_source(&self) -> Result<VoltageSource, SimError> {
        Ok(match *self {
            MotorCommand::OpenLoop { voltage } | MotorCommand::OpenLoopInductive { voltage } => {
                VoltageSource::Constant(voltage)
            }
            MotorCommand::Proportional { setpoint, kp } => {
                VoltageSource::Proportional { setpoint, kp }
            }
            MotorCommand::ProportionalIntegral { setpoint, kp, ki } => VoltageSource::Pi {
                setpoint,
                controller: PiController::new(PiConfig::pi(kp, ki))?,
            },
        })
    }
}

enum VoltageSource {
    Constant(f64),
    Proportional { setpoint: f64, kp: f64 },
    Pi { setpoint: f64, controller: PiController },
}

impl VoltageSource {
    fn voltage(&mut self, speed: f64, dt: f64) -> Result<f64, SimError> {
        match self {
            VoltageSource::Constant(voltage) => Ok(*voltage),
            VoltageSource::Proportional { setpoint, kp } => Ok(proportional(*kp, *setpoint, speed)),
            VoltageSource::Pi { setpoint, controller } => controller.update(*setpoint, speed, dt),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MotorSimulator {
    motors: Registry<DcMotor>,
}

impl MotorSimulator {
    pub fn new(name: impl Into<String>) -> Self {
        MotorSimulator {
            motors: Registry::new(name, "motor"),
        }
    }

    pub fn name(&self) -> &str {
        self.motors.owner()
    }

    pub fn add_motor(&mut self, motor: DcMotor) -> Result<(), SimError> {
        self.motors.insert(motor)
    }

    pub fn remove_motor(&mut self, name: &str) -> Option<DcMotor> {
        self.motors.remove(name)
    }

    pub fn motor(&self, name: &str) -> Option<&DcMotor> {
        self.motors.get(name)
    }

    pub fn motors(&self) -> impl Iterator<Item = &DcMotor> {
        self.motors.iter()
    }

    /// Runs the named motor from `t = 0` until `duration` and returns the
    /// time samples, aligned with the samples the run appended.
    ///
    /// An unknown name is logged and yields an empty time vector.
    pub fn run(
        &mut self,
        name: &str,
        dt: f64,
        duration: f64,
        command: MotorCommand,
    ) -> Result<Vec<f64>, SimError> {
        let clock = FixedStepClock::new(dt, duration)?;
        let mut source = command.voltage_source()?;
        let Some(motor) = self.motors.lookup_mut(name) else {
            return Ok(Vec::new());
        };

        debug!("running motor {} for {} s (dt = {}): {:?}", name, duration, dt, command);
        let inductive = command.uses_inductance();
        let times = clock.run(|ctx| {
            let voltage = source.voltage(motor.speed(), ctx.dt)?;
            motor.compute_analytical(ctx.end_time(), voltage);
            if inductive {
                motor.step_with_inductance(ctx.dt, voltage)?;
            } else {
                motor.step_no_inductance(ctx.dt, voltage)?;
            }
            Ok(())
        })?;
        debug!(
            "motor {} finished after {} steps at {:.4} rad/s",
            name,
            times.len() - 1,
            motor.speed()
        );
        Ok(times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use electrical::MotorConstant;
    use simcore::Model;

    fn bench() -> MotorSimulator {
        let mut sim = MotorSimulator::new("env");
        for name in ["mot1", "mot2", "mot3", "mot4"] {
            sim.add_motor(DcMotor::new(name, MotorConstant::default()).unwrap())
                .unwrap();
        }
        sim
    }

    #[test]
    fn test_duplicate_motor_rejected() {
        let mut sim = bench();
        let err = sim
            .add_motor(DcMotor::new("mot2", MotorConstant::default()).unwrap())
            .unwrap_err();
        assert_eq!(err, SimError::DuplicateName { kind: "motor", name: "mot2".into() });
        assert_eq!(sim.motors().count(), 4);
    }

    #[test]
    fn test_remove_motor() {
        let mut sim = bench();
        assert!(sim.remove_motor("mot3").is_some());
        assert!(sim.motor("mot3").is_none());
        assert!(sim.remove_motor("mot3").is_none());
        assert_eq!(sim.motors().count(), 3);
    }

    #[test]
    fn test_open_loop_run_keeps_histories_aligned() {
        let mut sim = bench();
        let times = sim
            .run("mot1", 0.01, 1.0, MotorCommand::OpenLoop { voltage: 1.0 })
            .unwrap();

        let motor = sim.motor("mot1").unwrap();
        assert_eq!(times.len(), 101);
        for history in [
            motor.voltage(),
            motor.current(),
            motor.torque(),
            motor.angular_velocity(),
            motor.analytical_velocity(),
        ] {
            assert_eq!(history.len(), times.len());
        }

        // Analytical sample i is evaluated at times[i]
        let c = motor.constants();
        assert_abs_diff_eq!(
            motor.analytical_velocity()[50],
            c.analytical_speed(times[50], 1.0),
            epsilon = 1e-12
        );

        // Other motors are untouched
        assert_eq!(sim.motor("mot2").unwrap().angular_velocity().len(), 1);
    }

    #[test]
    fn test_open_loop_tracks_analytical_solution() {
        let mut sim = bench();
        sim.run("mot1", 0.001, 2.0, MotorCommand::OpenLoop { voltage: 1.0 })
            .unwrap();
        let motor = sim.motor("mot1").unwrap();
        let gap = motor
            .angular_velocity()
            .iter()
            .zip(motor.analytical_velocity())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        // Euler lags the exact response by at most a few percent of K
        assert!(gap < 0.005, "max gap {gap}");
    }

    #[test]
    fn test_inductive_run() {
        let mut sim = bench();
        let times = sim
            .run("mot2", 0.01, 0.5, MotorCommand::OpenLoopInductive { voltage: 1.0 })
            .unwrap();
        let motor = sim.motor("mot2").unwrap();
        assert_eq!(motor.current().len(), times.len());
        assert!(motor.speed() > 0.0);
    }

    #[test]
    fn test_pi_converges_to_setpoint() {
        let mut sim = bench();
        let command = MotorCommand::ProportionalIntegral { setpoint: 1.0, kp: 20.0, ki: 60.0 };
        sim.run("mot3", 0.01, 1.0, command).unwrap();

        let speed = sim.motor("mot3").unwrap().speed();
        assert!((speed - 1.0).abs() < 0.05, "final speed {speed}");
    }

    #[test]
    fn test_pi_accumulator_fresh_each_run() {
        let command = MotorCommand::ProportionalIntegral { setpoint: 1.0, kp: 20.0, ki: 60.0 };

        let mut sim = bench();
        sim.run("mot3", 0.01, 1.0, command).unwrap();
        let first: Vec<f64> = sim.motor("mot3").unwrap().angular_velocity().to_vec();

        sim.motors.reset();
        sim.run("mot3", 0.01, 1.0, command).unwrap();
        assert_eq!(sim.motor("mot3").unwrap().angular_velocity(), first.as_slice());
    }

    #[test]
    fn test_proportional_leaves_steady_state_error() {
        let mut sim = bench();
        sim.run("mot4", 0.01, 1.0, MotorCommand::Proportional { setpoint: 1.0, kp: 20.0 })
            .unwrap();
        let motor = sim.motor("mot4").unwrap();
        // kp·kc / (R·f + kc·ke + kp·kc)
        let c = motor.constants();
        let expected = 20.0 * c.torque_constant
            / (c.resistance * c.viscous_friction
                + c.torque_constant * c.back_emf_constant
                + 20.0 * c.torque_constant);
        assert_abs_diff_eq!(motor.speed(), expected, epsilon = 1e-6);
        assert!(motor.speed() < 0.7);
    }

    #[test]
    fn test_unknown_motor_is_noop() {
        let mut sim = bench();
        let times = sim
            .run("ghost", 0.01, 1.0, MotorCommand::OpenLoop { voltage: 1.0 })
            .unwrap();
        assert!(times.is_empty());
        assert!(sim.motors().all(|m| m.angular_velocity().len() == 1));
    }

    #[test]
    fn test_invalid_time_step() {
        let mut sim = bench();
        let err = sim
            .run("mot1", 0.0, 1.0, MotorCommand::OpenLoop { voltage: 1.0 })
            .unwrap_err();
        assert_eq!(err, SimError::InvalidTimeStep(0.0));
    }

    #[test]
    fn test_invalid_integral_gain() {
        let mut sim = bench();
        let command = MotorCommand::ProportionalIntegral { setpoint: 1.0, kp: 20.0, ki: 0.0 };
        assert!(sim.run("mot3", 0.01, 1.0, command).is_err());
        assert_eq!(sim.motor("mot3").unwrap().angular_velocity().len(), 1);
    }
}
