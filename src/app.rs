use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GridironApp {
    pub state: AppState,
}

impl GridironApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GridironApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: standings + plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a file to view team statistics  (File → Open…)");
                });
                return;
            }
            ui.columns(2, |cols| {
                table::standings_table(&mut cols[0], &mut self.state);
                plot::team_plot(&mut cols[1], &self.state);
            });
        });
    }
}
