use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),

    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    #[error("a {kind} named '{name}' is already registered")]
    DuplicateName { kind: &'static str, name: String },

    #[error("kinematic jacobian is singular")]
    SingularJacobian,
}

/// Rejects values that are not finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Rejects values that are not finite or are negative.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

pub fn ensure_time_step(dt: f64) -> Result<f64, SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(SimError::InvalidTimeStep(dt))
    }
}
