//! Render a three-band gauge at a few points of its needle animation.
//!
//! Run with: `cargo run -p chart-gauge --example render_gauge > gauge.svg`

use chart_gauge::{Animated, Band, Color, Component, Gauge, GaugeConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let bands = vec![
        Band::new("Low", 0.0, 30.0, Color::parse("green")?),
        Band::new("Medium", 30.0, 70.0, Color::parse("yellow")?),
        Band::new("High", 70.0, 100.0, Color::parse("red")?),
    ];
    let config = GaugeConfig::new(10.0)
        .bands(bands)
        .units("%")
        .label("CPU")
        .tooltip("Processor load");
    let mut gauge = Gauge::new(config)?;
    gauge.on_mount(0.0);
    gauge.set_value(82.0, 0.0);

    for t in [0.0, 600.0, 900.0, 1_500.0, 3_500.0] {
        gauge.tick(t);
        eprintln!(
            "t={t:>6}ms needle at {:>7.2} deg",
            gauge.needle().rendered_angle().to_degrees()
        );
    }
    print!("{}", gauge.to_svg());
    Ok(())
}
