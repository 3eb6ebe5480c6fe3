pub mod analysis;
pub mod motor;

pub use analysis::OperatingPoint;
pub use motor::{DcMotor, MotorConstant, MotorInitialState};
