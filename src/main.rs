use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use vertical_flight::config::{MotorConfig, RunConfig, DEFAULT_BURN_DURATION, DEFAULT_THRUST};
use vertical_flight::io::{self, FlightSummary};
use vertical_flight::sim::{self, EventKind, FlightRecord};
use vertical_flight::telemetry::TelemetryRecorder;
use vertical_flight::units::Duration;

#[derive(Parser, Debug)]
#[command(name = "vertical-flight")]
#[command(about = "Fly a point-mass rocket straight up and record per-step telemetry")]
pub struct Cli {
    #[arg(long, help = "TOML run configuration; flags below override it")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "simulation time budget (s)")]
    pub duration: Option<f32>,
    #[arg(long, help = "fixed step size (s)")]
    pub dt: Option<f32>,

    #[arg(long, help = "constant motor burn time (s)", conflicts_with_all = ["profile", "preset"])]
    pub burn_time: Option<f32>,
    #[arg(long, help = "constant motor thrust (N)", conflicts_with_all = ["profile", "preset"])]
    pub thrust: Option<f64>,
    #[arg(long, help = "thrust curve JSON file", conflicts_with = "preset")]
    pub profile: Option<PathBuf>,
    #[arg(long, help = "built-in thrust curve, e.g. f15")]
    pub preset: Option<String>,

    #[arg(long, help = "vehicle mass (kg)")]
    pub mass: Option<f64>,
    #[arg(long, help = "hold the rocket on the pad until thrust exceeds weight")]
    pub launch_hold: bool,

    #[arg(long, help = "telemetry output file")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "write a JSON flight summary here")]
    pub summary: Option<PathBuf>,
}

impl Cli {
    /// Layer command line flags over the loaded (or default) configuration.
    fn apply(self, mut config: RunConfig) -> RunConfig {
        if let Some(duration) = self.duration {
            config.sim.duration = Duration::from_secs(duration);
        }
        if let Some(dt) = self.dt {
            config.sim.dt = Duration::from_secs(dt);
        }

        if let Some(path) = self.profile {
            config.motor = MotorConfig::Profile { path };
        } else if let Some(name) = self.preset {
            config.motor = MotorConfig::Preset { name };
        } else if self.burn_time.is_some() || self.thrust.is_some() {
            let (mut burn_duration, mut thrust) = match config.motor {
                MotorConfig::Constant { burn_duration, thrust } => (burn_duration, thrust),
                _ => (DEFAULT_BURN_DURATION, DEFAULT_THRUST),
            };
            if let Some(secs) = self.burn_time {
                burn_duration = Duration::from_secs(secs);
            }
            if let Some(newtons) = self.thrust {
                thrust = newtons;
            }
            config.motor = MotorConfig::Constant { burn_duration, thrust };
        }

        if let Some(mass) = self.mass {
            config.mass = mass;
        }
        if self.launch_hold {
            config.launch_hold = true;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.summary.is_some() {
            config.summary = self.summary;
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    let config = cli.apply(config);

    // Every input is validated, and any profile read, before a file is written
    let rocket = config.build_rocket().context("invalid run configuration")?;
    info!(
        "flying {} on {} kg for up to {} steps of {}",
        rocket.motor().name(),
        config.mass,
        config.sim.step_count(),
        config.sim.dt
    );

    let mut record = sim::simulate_with(rocket, &config.sim, TelemetryRecorder::standard());

    io::write_telemetry_file(&config.output, &mut record.telemetry)
        .with_context(|| format!("writing telemetry to {}", config.output.display()))?;
    info!("wrote {} rows to {}", record.telemetry.len(), config.output.display());

    let summary = FlightSummary::from_record(&record);
    if let Some(path) = &config.summary {
        io::write_summary_file(path, &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        info!("wrote flight summary to {}", path.display());
    }

    print_report(&config, &record, &summary);
    Ok(())
}

fn print_report(config: &RunConfig, record: &FlightRecord, summary: &FlightSummary) {
    println!();
    println!("====================================================================");
    println!("  VERTICAL FLIGHT: {}", record.motor_name);
    println!("====================================================================");
    println!();
    println!("  Run Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.3} kg    Launch hold:  {:>8}",
        config.mass, config.launch_hold
    );
    println!(
        "  Peak thrust:   {:>8.2} N     Impulse:      {:>8.2} N·s",
        summary.motor_peak_thrust_n, summary.motor_impulse_ns
    );
    println!(
        "  Step:          {:>8} s     Budget:       {:>8} s",
        config.sim.dt.as_secs(),
        config.sim.duration.as_secs()
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in &record.events {
        let s = &event.snapshot;
        println!(
            "  {:<9} t={:>6.1}s   alt={:>8.1}m   vel={:>7.1}m/s   thrust={:>6.2}N",
            event.kind,
            s.time.as_secs(),
            s.altitude,
            s.velocity,
            s.thrust
        );
    }
    if record.event(EventKind::Touchdown).is_none() {
        println!("  (no touchdown within the time budget)");
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Max altitude:  {:>8.1} m   at t={:.1} s",
        summary.apogee_m, summary.apogee_time_s
    );
    println!("  Max speed:     {:>8.1} m/s", summary.max_velocity_ms);
    println!("  Max accel:     {:>8.2} m/s^2 ({:.2} g)", summary.max_accel_ms2, summary.max_accel_ms2 / 9.81);
    println!("  Flight time:   {:>8.1} s", summary.flight_time_s);
    if summary.touched_down {
        println!("  Impact speed:  {:>8.1} m/s", -summary.impact_velocity_ms);
    }
    println!();

    println!("  Simulation: {} rows written to {}", summary.rows, config.output.display());
    println!("====================================================================");
    println!();
}
