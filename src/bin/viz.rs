use std::path::PathBuf;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};
use log::LevelFilter;

use vertical_flight::config::RunConfig;
use vertical_flight::io::FlightSummary;
use vertical_flight::sim::{self, FlightSnapshot};
use vertical_flight::telemetry::TelemetryRecorder;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    // Optional first argument: a TOML run configuration
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => RunConfig::from_file(&path)?,
        None => RunConfig::default(),
    };
    let rocket = config.build_rocket()?;
    let record = sim::simulate_with(rocket, &config.sim, TelemetryRecorder::standard());
    let summary = FlightSummary::from_record(&record);

    let app = FlightViz { trajectory: record.trajectory, summary };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Vertical Flight", options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

struct FlightViz {
    trajectory: Vec<FlightSnapshot>,
    summary: FlightSummary,
}

fn time_plot(ui: &mut egui::Ui, id: &str, label: &str, size: [f32; 2], points: PlotPoints) {
    ui.vertical(|ui| {
        ui.label(label);
        Plot::new(id)
            .width(size[0])
            .height(size[1])
            .x_axis_label("Time (s)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(label, points));
            });
    });
}

impl eframe::App for FlightViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.trajectory.len() / 2000).max(1);
        let sampled: Vec<&FlightSnapshot> = self.trajectory.iter().step_by(step).collect();
        let series = |f: fn(&FlightSnapshot) -> f64| -> PlotPoints {
            sampled.iter().map(|s| [s.time.as_secs_f64(), f(s)]).collect()
        };

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let s = &self.summary;
            ui.heading(format!("Motor: {}", s.motor));
            let burnout = s
                .burnout_time_s
                .map_or_else(|| "none".to_string(), |t| format!("{t:.1} s"));
            ui.label(format!(
                "Apogee: {:.1} m at {:.1} s  |  Burnout: {}  |  Flight: {:.1} s{}",
                s.apogee_m,
                s.apogee_time_s,
                burnout,
                s.flight_time_s,
                if s.touched_down { "" } else { " (no touchdown)" },
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let size = [available.x / 2.0 - 8.0, available.y / 2.0 - 8.0];

            ui.horizontal(|ui| {
                time_plot(ui, "altitude", "Altitude (m)", size, series(|s| s.altitude));
                time_plot(ui, "velocity", "Velocity (m/s)", size, series(|s| s.velocity));
            });
            ui.horizontal(|ui| {
                time_plot(ui, "thrust", "Thrust (N)", size, series(|s| s.thrust));
                time_plot(ui, "accel", "Acceleration (m/s^2)", size, series(|s| s.acceleration));
            });
        });
    }
}
