//! Simulation runners for DC motors and differential-drive robots
//!
//! - [`MotorSimulator`] and [`RobotSimulator`] own named entities and drive
//!   them through fixed-step runs
//! - [`ScenarioConfig`] describes a batch of runs as JSON
//! - [`report`] writes finished runs as CSV traces

pub mod motor_sim;
pub mod report;
pub mod robot_sim;
pub mod scenario;

pub use motor_sim::{MotorCommand, MotorSimulator};
pub use robot_sim::{RobotCommand, RobotSimulator};
pub use scenario::{MotorRun, RobotRun, RobotTask, ScenarioConfig, ScenarioError, ScenarioOutcome};
