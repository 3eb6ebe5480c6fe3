//! Shared types for the motor and mobile robot simulators
//!
//! This crate provides:
//! - Plain value types (`Vector2D`, `Pose`, `BodyVelocity`, `WheelSpeeds`)
//! - Append-only signal histories
//! - The `Model`/`Named` traits and a name-keyed entity registry
//! - A fixed-step simulation clock
//! - The common error type

pub mod clock;
pub mod error;
pub mod history;
pub mod registry;
pub mod traits;
pub mod vector;

pub use clock::FixedStepClock;
pub use error::{SimError, ensure_non_negative, ensure_positive, ensure_time_step};
pub use history::History;
pub use registry::Registry;
pub use traits::*;
pub use vector::Vector2D;
