use clap::Parser;
use eframe::egui;

use periodic_explorer::app::PeriodicApp;
use periodic_explorer::config::{Cli, Config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_cli(Cli::parse())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Periodic Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(PeriodicApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
