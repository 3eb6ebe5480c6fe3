pub mod diff_drive;

pub use diff_drive::{DiffDriveConfig, DifferentialDriveRobot};
