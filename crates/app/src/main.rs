use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use kobuki_sim_app::{ScenarioConfig, report};
use log::{LevelFilter, info};
use simcore::Named;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut args = std::env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => {
            info!("loading scenario from {}", path);
            ScenarioConfig::from_path(&path)?
        }
        None => ScenarioConfig::demo(),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "target/kobuki-sim".into()));
    std::fs::create_dir_all(&out_dir)?;

    let outcome = scenario.run()?;

    for motor in outcome.motors.motors() {
        let Some(times) = outcome.motor_times.get(motor.name()) else {
            continue;
        };
        let path = out_dir.join(format!("{}.csv", motor.name()));
        report::write_motor_csv(BufWriter::new(File::create(&path)?), times, motor)?;
        info!(
            "{}: final speed {:.4} rad/s -> {}",
            motor.name(),
            motor.speed(),
            path.display()
        );
    }

    for robot in outcome.robots.robots() {
        let Some(times) = outcome.robot_times.get(robot.name()) else {
            continue;
        };
        let path = out_dir.join(format!("{}.csv", robot.name()));
        report::write_robot_csv(BufWriter::new(File::create(&path)?), times, robot)?;
        let pose = robot.pose();
        info!(
            "{}: final pose ({:.3}, {:.3}, {:.3} rad) -> {}",
            robot.name(),
            pose.position.x,
            pose.position.y,
            pose.heading,
            path.display()
        );
    }

    Ok(())
}
