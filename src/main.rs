mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::DvfRadiusApp;
use clap::Parser;
use dvf_radius::config::{PredictorLayout, Settings, DEFAULT_RADIUS};
use eframe::egui;

/// Click on the map to list nearby house sales and fit a price model.
#[derive(Debug, Parser)]
#[command(name = "dvf-radius", version, about)]
struct Cli {
    /// Mutations to open at startup (`mutations.json` or a DVF `.csv`).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Initial search radius in meters.
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: f64,

    /// Which area field feeds which regression column.
    #[arg(long, value_enum, default_value_t = PredictorLayout::Standard)]
    predictors: PredictorLayout,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Settings {
            data_path: cli.data,
            radius: cli.radius,
            predictors: cli.predictors,
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::from(Cli::parse());
    let app = DvfRadiusApp::new(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DVF Radius – Price Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
