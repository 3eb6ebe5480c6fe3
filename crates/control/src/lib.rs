//! Control laws for motor and robot control
//!
//! This crate provides:
//! - P and PI controllers for closed-loop motor speed control
//! - A position-homing controller for differential-drive robots
//! - Deterministic open-loop robot trajectories

pub mod homing;
pub mod pi;
pub mod trajectory;

pub use homing::*;
pub use pi::*;
pub use trajectory::*;
