use electrical::motor::{DcMotor, MotorConstant};
use std::fs::File;
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two identical motors: one ignores inductance, one integrates it
    let mut plain = DcMotor::new("plain", MotorConstant::default())?;
    let mut inductive = DcMotor::new("inductive", MotorConstant::default())?;

    // Sim settings
    let dt = 1e-2;
    let t_end = 1.0; // seconds
    let voltage = 1.0;

    let mut t = 0.0;
    while t < t_end {
        t += dt;
        plain.compute_analytical(t, voltage);
        plain.step_no_inductance(dt, voltage)?;
        inductive.step_with_inductance(dt, voltage)?;
    }

    let mut csv = File::create("motor_step_response.csv")?;
    writeln!(csv, "step,omega,omega_analytical,current,omega_inductive,current_inductive")?;
    for i in 0..plain.angular_velocity().len() {
        writeln!(
            csv,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
            i,
            plain.angular_velocity()[i],
            plain.analytical_velocity()[i],
            plain.current()[i],
            inductive.angular_velocity()[i],
            inductive.current()[i]
        )?;
    }

    println!(
        "Wrote motor_step_response.csv (steady state {:.4} rad/s)",
        plain.constants().steady_state_speed(voltage)
    );
    Ok(())
}
