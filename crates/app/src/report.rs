//! CSV traces of finished runs.

use std::io::{self, Write};

use electrical::DcMotor;
use mechanics::DifferentialDriveRobot;

/// Writes `t,voltage,current,torque,omega,omega_analytical`, one row per sample.
pub fn write_motor_csv<W: Write>(mut out: W, times: &[f64], motor: &DcMotor) -> io::Result<()> {
    writeln!(out, "t,voltage,current,torque,omega,omega_analytical")?;
    let rows = times
        .iter()
        .zip(motor.voltage())
        .zip(motor.current())
        .zip(motor.torque())
        .zip(motor.angular_velocity())
        .zip(motor.analytical_velocity());
    for (((((t, v), i), torque), omega), analytical) in rows {
        writeln!(out, "{t},{v},{i},{torque},{omega},{analytical}")?;
    }
    Ok(())
}

/// Writes `t,x,y,heading`, one row per sample.
pub fn write_robot_csv<W: Write>(
    mut out: W,
    times: &[f64],
    robot: &DifferentialDriveRobot,
) -> io::Result<()> {
    writeln!(out, "t,x,y,heading")?;
    for ((t, p), heading) in times.iter().zip(robot.position()).zip(robot.orientation()) {
        writeln!(out, "{t},{},{},{heading}", p.x, p.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use electrical::MotorConstant;
    use mechanics::DiffDriveConfig;
    use simcore::WheelSpeeds;

    #[test]
    fn test_motor_csv() {
        let mut motor = DcMotor::new("m", MotorConstant::default()).unwrap();
        motor.compute_analytical(0.1, 1.0);
        motor.step_no_inductance(0.1, 1.0).unwrap();

        let mut buf = Vec::new();
        write_motor_csv(&mut buf, &[0.0, 0.1], &motor).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "t,voltage,current,torque,omega,omega_analytical");
        assert_eq!(lines[1], "0,0,0,0,0,0");
        assert!(lines[2].starts_with("0.1,1,1,"));
    }

    #[test]
    fn test_robot_csv() {
        let mut robot = DifferentialDriveRobot::new("r", DiffDriveConfig::default()).unwrap();
        robot.step_from_wheel_speeds(1.0, WheelSpeeds::new(1.0, 1.0)).unwrap();

        let mut buf = Vec::new();
        write_robot_csv(&mut buf, &[0.0, 1.0], &robot).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "t,x,y,heading\n0,0,0,0\n1,0.075,0,0\n");
    }
}
