use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PeriodicApp {
    pub state: AppState,
}

impl PeriodicApp {
    /// Create the app and kick off the one-time load of the configured table.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        let mut state = AppState::new(config.source.clone(), config.timeout);
        state.begin_load(config.source.clone(), &cc.egui_ctx);
        Self { state }
    }
}

impl eframe::App for PeriodicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.loading {
                table::loading_screen(ui);
            } else {
                table::periodic_table(ui, &mut self.state);
            }
        });
    }
}
