use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{conference_options, Conference};
use crate::data::schema::SEASON_YEAR;
use crate::state::{AppState, FilterEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Widget changes are collected as events and
/// applied once the panel is drawn.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut events: Vec<FilterEvent> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Conference radio buttons ----
            ui.strong("NFL Conference");
            let mut conference = state.filters.conference.clone();
            for option in conference_options(&dataset) {
                let label = option.to_string();
                ui.radio_value(&mut conference, option, label);
            }
            if conference != state.filters.conference {
                events.push(FilterEvent::ConferenceChanged(conference));
            }
            ui.add_space(6.0);

            // ---- Division dropdown ----
            ui.strong("NFL Division");
            let current = state.filters.division.clone();
            egui::ComboBox::from_id_salt("division")
                .selected_text(current.as_deref().unwrap_or("Select NFL Division"))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current.is_none(), "None").clicked() {
                        events.push(FilterEvent::DivisionChanged(None));
                    }
                    for div in &state.division_options {
                        let selected = current.as_deref() == Some(div.as_str());
                        if ui.selectable_label(selected, div.as_str()).clicked() && !selected {
                            events.push(FilterEvent::DivisionChanged(Some(div.clone())));
                        }
                    }
                });
            ui.separator();

            // ---- Year slider ----
            ui.strong("Season");
            let years = dataset.years();
            let mut year = state.filters.year.unwrap_or(*years.end());
            let slider = egui::Slider::new(&mut year, years).step_by(1.0);
            if ui.add(slider).changed() {
                events.push(FilterEvent::YearChanged(Some(year)));
            }
            ui.separator();

            // ---- Team multi-select ----
            let n_selected = state.filters.teams.len();
            let n_total = dataset.teams().len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Teams  ({n_selected}/{n_total})")).strong(),
            )
            .id_salt("teams")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        events.push(FilterEvent::TeamsChanged(
                            dataset.teams().iter().cloned().collect(),
                        ));
                    }
                    if ui.small_button("None").clicked() {
                        events.push(FilterEvent::TeamsChanged(BTreeSet::new()));
                    }
                });

                let mut teams = state.filters.teams.clone();
                let mut changed = false;
                for team in dataset.teams() {
                    let mut checked = teams.contains(team);
                    if ui.checkbox(&mut checked, team.as_str()).changed() {
                        changed = true;
                        if checked {
                            teams.insert(team.clone());
                        } else {
                            teams.remove(team);
                        }
                    }
                }
                if changed {
                    events.push(FilterEvent::TeamsChanged(teams));
                }
            });
            ui.separator();

            // ---- Axis metrics ----
            ui.strong("X-Axis Metric (plot only)");
            if let Some(x) = metric_combo(ui, "x_metric", &state.axes.x, dataset.metric_columns()) {
                events.push(FilterEvent::XMetricChanged(Some(x)));
            }
            ui.strong("Y-Axis Metric (plot only)");
            if let Some(y) = metric_combo(ui, "y_metric", &state.axes.y, dataset.metric_columns()) {
                events.push(FilterEvent::YMetricChanged(Some(y)));
            }

            // ---- Division colour legend ----
            if let Some(cm) = &state.color_map {
                ui.separator();
                ui.strong("Divisions");
                for (name, color) in cm.legend_entries() {
                    ui.label(RichText::new(name).color(color));
                }
            }
        });

    for event in events {
        state.apply(event);
    }
}

/// Combo box over the metric columns; returns the newly picked column.
fn metric_combo(ui: &mut Ui, id: &str, current: &Option<String>, metrics: &[String]) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.as_deref().unwrap_or("Select metric"))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in metrics {
                let selected = current.as_deref() == Some(metric.as_str());
                if ui.selectable_label(selected, metric.as_str()).clicked() && !selected {
                    picked = Some(metric.clone());
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let seasons = ds.unique_values(SEASON_YEAR).map_or(0, |years| years.len());
            ui.label(format!(
                "{} team seasons over {seasons} seasons loaded, {} visible",
                ds.len(),
                state.visible_rows
            ));
        }

        if state.filters.conference != Conference::All {
            ui.separator();
            ui.label(format!("Conference: {}", state.filters.conference));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Reload from a user-picked file. A failed load keeps the current dataset.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open team statistics")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} team seasons with columns {:?}",
                    dataset.len(),
                    dataset.columns()
                );
                state.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
