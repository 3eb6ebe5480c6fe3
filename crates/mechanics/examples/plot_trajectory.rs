use mechanics::{DiffDriveConfig, DifferentialDriveRobot};
use plotters::prelude::*;
use simcore::{Named, Pose, WheelSpeeds};

fn draw_trajectories(
    filename: &str,
    title: &str,
    robots: &[(&DifferentialDriveRobot, RGBColor)],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let points = robots.iter().flat_map(|(r, _)| r.position().iter());
    let (mut x_min, mut x_max, mut y_min, mut y_max) =
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    // Equal axes so circles stay circles
    let span = (x_max - x_min).max(y_max - y_min).max(1e-3) * 0.55;
    let (cx, cy) = ((x_min + x_max) / 2.0, (y_min + y_max) / 2.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("Arial", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((cx - span)..(cx + span), (cy - span)..(cy + span))?;

    chart.configure_mesh().x_desc("x [m]").y_desc("y [m]").draw()?;

    for (robot, color) in robots {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                robot.position().iter().map(|p| (p.x, p.y)),
                &color,
            ))?
            .label(robot.name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DiffDriveConfig::default();
    let dt = 0.01;

    // Straight line, then a circle of radius 1 m
    let mut straight = DifferentialDriveRobot::new("straight", config)?;
    let mut circle = DifferentialDriveRobot::with_pose("circle", config, Pose::new(0.0, 0.5, 0.0))?;

    let radius = 1.0;
    let rot_speed = 1.0;
    let circle_wheels = WheelSpeeds::new(
        rot_speed * (radius + config.axle_length / 2.0),
        rot_speed * (radius - config.axle_length / 2.0),
    );

    let mut t = 0.0;
    while t < 85.0 {
        straight.step_from_wheel_speeds(dt, WheelSpeeds::new(1.0, 1.0))?;
        circle.step_from_wheel_speeds(dt, circle_wheels)?;
        t += dt;
    }

    draw_trajectories(
        "robot_trajectories.png",
        "Differential drive trajectories",
        &[(&straight, RED), (&circle, BLUE)],
    )?;

    println!("Wrote plot: robot_trajectories.png");
    Ok(())
}
