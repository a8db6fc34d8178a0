//! chart-gauge CLI - validate manifests, render SVG, sample needle frames.

use chart_gauge_core::{Animated, Component};
use chart_gauge_widgets::{BandPolicy, Gauge, GaugeConfig};
use chart_gauge_yaml::Manifest;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chart-gauge")]
#[command(about = "Radial gauge renderer")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check manifest validity
    Check {
        /// Path to manifest file (YAML or JSON)
        #[arg(default_value = "gauges.yaml")]
        manifest: PathBuf,
    },

    /// Render one gauge as a static SVG
    Render {
        /// Path to manifest file (YAML or JSON)
        manifest: PathBuf,

        /// Gauge id (default: first gauge)
        #[arg(long)]
        id: Option<String>,

        /// Change the value after mount
        #[arg(long)]
        value: Option<f64>,

        /// Milliseconds after mount to capture (default: settled)
        #[arg(long)]
        at_ms: Option<f64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sample the needle angle while it moves to a new value
    Frames {
        /// Path to manifest file (YAML or JSON)
        manifest: PathBuf,

        /// Gauge id (default: first gauge)
        #[arg(long)]
        id: Option<String>,

        /// Target value
        #[arg(long)]
        value: f64,

        /// Sampling interval in milliseconds
        #[arg(long, default_value = "50")]
        step_ms: f64,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check { manifest } => check_manifest(&manifest),
        Commands::Render {
            manifest,
            id,
            value,
            at_ms,
            output,
        } => render(&manifest, id.as_deref(), value, at_ms, output.as_deref()),
        Commands::Frames {
            manifest,
            id,
            value,
            step_ms,
            json,
        } => frames(&manifest, id.as_deref(), value, step_ms, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Commands
// =============================================================================

fn check_manifest(path: &Path) -> Result<(), String> {
    println!("Checking manifest: {}", path.display());
    let manifest = Manifest::load(path).map_err(|e| format!("manifest invalid: {e}"))?;

    println!("Manifest valid!");
    for (index, entry) in manifest.gauges.iter().enumerate() {
        println!("  {}", describe(&entry.name(index), &entry.config));
    }
    Ok(())
}

fn render(
    path: &Path,
    id: Option<&str>,
    value: Option<f64>,
    at_ms: Option<f64>,
    output: Option<&Path>,
) -> Result<(), String> {
    let mut gauge = load_gauge(path, id)?;
    let svg = render_svg(&mut gauge, value, at_ms);

    match output {
        Some(out) => {
            fs::write(out, &svg).map_err(|e| format!("failed to write {}: {e}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn frames(
    path: &Path,
    id: Option<&str>,
    value: f64,
    step_ms: f64,
    json: bool,
) -> Result<(), String> {
    if !(step_ms.is_finite() && step_ms > 0.0) {
        return Err(format!("--step-ms must be positive, got {step_ms}"));
    }
    let mut gauge = load_gauge(path, id)?;
    let samples = sample_frames(&mut gauge, value, step_ms);

    if json {
        let text = serde_json::to_string_pretty(&samples).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        println!("{:>8}  {:>10}  {:>9}", "t_ms", "angle", "degrees");
        for frame in &samples {
            println!(
                "{:>8.0}  {:>10.5}  {:>9.2}",
                frame.t_ms, frame.angle, frame.degrees
            );
        }
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

/// One needle sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Frame {
    t_ms: f64,
    angle: f64,
    degrees: f64,
}

fn load_gauge(path: &Path, id: Option<&str>) -> Result<Gauge, String> {
    let manifest = Manifest::load(path).map_err(|e| e.to_string())?;
    let id = match id {
        Some(id) => id.to_string(),
        None => manifest.ids().into_iter().next().unwrap_or_default(),
    };
    tracing::debug!(manifest = %path.display(), id = %id, "building gauge");
    manifest.build(&id).map_err(|e| e.to_string())
}

fn describe(name: &str, config: &GaugeConfig) -> String {
    let policy = match config.band_policy {
        BandPolicy::Sectioned => "sectioned",
        BandPolicy::Proportional => "proportional",
        BandPolicy::FullSweep => "full-sweep",
    };
    let size = config.canvas_size();
    format!(
        "{name}: domain [{}, {}], {} band(s), {policy}, {}x{}",
        config.min_value(),
        config.max_value(),
        config.bands.len(),
        size.width,
        size.height
    )
}

/// Mount at t=0, optionally change the value, and capture the scene at
/// `at_ms` (or once every animation has finished).
fn render_svg(gauge: &mut Gauge, value: Option<f64>, at_ms: Option<f64>) -> String {
    gauge.on_mount(0.0);
    if let Some(value) = value {
        gauge.set_value(value, 0.0);
    }
    let settle_ms = gauge.config().needle_timing.total_ms();
    gauge.tick(at_ms.unwrap_or(settle_ms).max(0.0));
    gauge.to_svg()
}

fn sample_frames(gauge: &mut Gauge, value: f64, step_ms: f64) -> Vec<Frame> {
    gauge.on_mount(0.0);
    let settle_ms = gauge.config().needle_timing.total_ms();
    gauge.tick(settle_ms);
    gauge.set_value(value, 0.0);

    let mut samples = Vec::new();
    let mut t = 0.0;
    loop {
        gauge.tick(t);
        let angle = gauge.needle().rendered_angle();
        samples.push(Frame {
            t_ms: t,
            angle,
            degrees: angle.to_degrees(),
        });
        if !gauge.is_animating() {
            break;
        }
        t += step_ms;
    }
    samples
}
