use log::debug;
use serde::{Deserialize, Serialize};
use simcore::{
    History, Model, Named, SimError, ensure_non_negative, ensure_positive, ensure_time_step,
};

/// Electrical and mechanical constants of a permanent-magnet DC motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConstant {
    /// Armature resistance R (ohm)
    pub resistance: f64,
    /// Armature inductance L (H)
    pub inductance: f64,
    /// Torque constant kc (N·m/A)
    pub torque_constant: f64,
    /// Back-EMF constant ke (V·s/rad)
    pub back_emf_constant: f64,
    /// Rotor inertia J (kg·m²)
    pub inertia: f64,
    /// Viscous friction f (N·m·s/rad)
    pub viscous_friction: f64,
}

impl Default for MotorConstant {
    fn default() -> Self {
        MotorConstant {
            resistance: 1.0,
            inductance: 0.001,
            torque_constant: 0.01,
            back_emf_constant: 0.01,
            inertia: 0.01,
            viscous_friction: 0.1,
        }
    }
}

impl MotorConstant {
    pub fn new(
        resistance: f64,
        inductance: f64,
        torque_constant: f64,
        back_emf_constant: f64,
        inertia: f64,
        viscous_friction: f64,
    ) -> Self {
        MotorConstant {
            resistance,
            inductance,
            torque_constant,
            back_emf_constant,
            inertia,
            viscous_friction,
        }
    }

    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.resistance = resistance;
        self
    }

    pub fn with_inductance(mut self, inductance: f64) -> Self {
        self.inductance = inductance;
        self
    }

    pub fn with_torque_constant(mut self, kc: f64) -> Self {
        self.torque_constant = kc;
        self
    }

    pub fn with_back_emf_constant(mut self, ke: f64) -> Self {
        self.back_emf_constant = ke;
        self
    }

    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn with_viscous_friction(mut self, f: f64) -> Self {
        self.viscous_friction = f;
        self
    }

    /// Resistance and inertia are divisors in every step and must be positive.
    pub fn validate(&self) -> Result<(), SimError> {
        ensure_positive("resistance", self.resistance)?;
        ensure_positive("inertia", self.inertia)?;
        ensure_non_negative("inductance", self.inductance)?;
        ensure_non_negative("torque_constant", self.torque_constant)?;
        ensure_non_negative("back_emf_constant", self.back_emf_constant)?;
        ensure_non_negative("viscous_friction", self.viscous_friction)?;
        Ok(())
    }
}

/// Conditions the motor starts from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorInitialState {
    pub voltage: f64,
    pub torque: f64,
    pub angular_velocity: f64,
}

impl MotorInitialState {
    pub fn with_voltage(mut self, voltage: f64) -> Self {
        self.voltage = voltage;
        self
    }

    pub fn with_torque(mut self, torque: f64) -> Self {
        self.torque = torque;
        self
    }

    pub fn with_angular_velocity(mut self, omega: f64) -> Self {
        self.angular_velocity = omega;
        self
    }
}

/// DC motor driven by an input voltage, producing torque and shaft speed.
///
/// Each signal is kept as a full history so a run can be inspected or
/// plotted afterwards. A full step appends exactly one sample to the
/// voltage, current, torque and angular velocity histories.
#[derive(Debug, Clone)]
pub struct DcMotor {
    name: String,
    constants: MotorConstant,
    voltage: History<f64>,
    current: History<f64>,
    torque: History<f64>,
    angular_velocity: History<f64>,
    analytical_velocity: History<f64>,
}

impl DcMotor {
    pub fn new(name: impl Into<String>, constants: MotorConstant) -> Result<Self, SimError> {
        Self::with_initial_state(name, constants, MotorInitialState::default())
    }

    pub fn with_initial_state(
        name: impl Into<String>,
        constants: MotorConstant,
        initial: MotorInitialState,
    ) -> Result<Self, SimError> {
        constants.validate()?;
        Ok(DcMotor {
            name: name.into(),
            constants,
            voltage: History::new(initial.voltage),
            current: History::new(0.0),
            torque: History::new(initial.torque),
            angular_velocity: History::new(initial.angular_velocity),
            analytical_velocity: History::new(0.0),
        })
    }

    pub fn constants(&self) -> &MotorConstant {
        &self.constants
    }

    /// Last applied input voltage
    pub fn last_voltage(&self) -> f64 {
        self.voltage.last()
    }

    pub fn speed(&self) -> f64 {
        self.angular_velocity.last()
    }

    pub fn voltage(&self) -> &[f64] {
        self.voltage.as_slice()
    }

    pub fn current(&self) -> &[f64] {
        self.current.as_slice()
    }

    pub fn torque(&self) -> &[f64] {
        self.torque.as_slice()
    }

    pub fn angular_velocity(&self) -> &[f64] {
        self.angular_velocity.as_slice()
    }

    pub fn analytical_velocity(&self) -> &[f64] {
        self.analytical_velocity.as_slice()
    }

    /// Electrical equation with L = 0: `U = E + R·i`.
    pub fn step_electrical(&mut self, voltage: f64) {
        let c = &self.constants;
        let current = (voltage - c.back_emf_constant * self.angular_velocity.last()) / c.resistance;
        self.voltage.push(voltage);
        self.current.push(current);
    }

    /// Discretized electrical equation `U = E + R·i + L·di/dt`.
    pub fn step_electrical_with_inductance(
        &mut self,
        dt: f64,
        voltage: f64,
    ) -> Result<(), SimError> {
        let dt = ensure_time_step(dt)?;
        let c = &self.constants;
        let inductance = ensure_positive("inductance", c.inductance)?;
        let current = (dt / inductance) * voltage
            - c.back_emf_constant * self.angular_velocity.last()
            + self.current.last() * (inductance / dt - c.resistance);
        self.voltage.push(voltage);
        self.current.push(current);
        Ok(())
    }

    /// Motor equation `τ = kc·i`.
    pub fn step_mechanical_coupling(&mut self) {
        let torque = self.constants.torque_constant * self.current.last();
        self.torque.push(torque);
    }

    /// Discretized mechanical equation `J·dω/dt + f·ω = τ`.
    pub fn step_mechanical(&mut self, dt: f64) -> Result<(), SimError> {
        let dt = ensure_time_step(dt)?;
        let c = &self.constants;
        let omega = (dt / c.inertia) * self.torque.last()
            + self.angular_velocity.last() * (1.0 - c.viscous_friction * dt / c.inertia);
        self.angular_velocity.push(omega);
        Ok(())
    }

    pub fn step_no_inductance(&mut self, dt: f64, voltage: f64) -> Result<(), SimError> {
        let dt = ensure_time_step(dt)?;
        self.step_electrical(voltage);
        self.step_mechanical_coupling();
        self.step_mechanical(dt)
    }

    pub fn step_with_inductance(&mut self, dt: f64, voltage: f64) -> Result<(), SimError> {
        self.step_electrical_with_inductance(dt, voltage)?;
        self.step_mechanical_coupling();
        self.step_mechanical(dt)
    }

    /// Appends the closed-form L = 0 step response at absolute time `t`.
    pub fn compute_analytical(&mut self, t: f64, voltage: f64) {
        let speed = self.constants.analytical_speed(t, voltage);
        self.analytical_velocity.push(speed);
    }
}

impl Named for DcMotor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Model for DcMotor {
    fn reset(&mut self) {
        debug!("resetting motor {}", self.name);
        self.voltage.reset();
        self.current.reset();
        self.torque.reset();
        self.angular_velocity.reset();
        self.analytical_velocity.reset();
    }
}
