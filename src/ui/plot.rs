use std::collections::BTreeSet;

use eframe::egui::{self, Color32, Ui};
use eframe::egui::load::{SizeHint, TexturePoll};
use egui_plot::{HLine, LineStyle, Plot, PlotImage, PlotPoint, Points, VLine};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (right half of the central panel)
// ---------------------------------------------------------------------------

/// Render the metric-vs-metric scatter plot with median lines and logos.
pub fn team_plot(ui: &mut Ui, state: &AppState) {
    let spec = state.plot.get();
    if spec.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Select a season and both axis metrics to plot.");
        });
        return;
    }

    ui.strong(spec.title.as_str());

    // Points under a logo are only hover targets.
    let decorated: BTreeSet<usize> = spec.decorations.iter().map(|d| d.row).collect();
    let ctx = ui.ctx().clone();

    Plot::new("team_plot")
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.1}, {:.1}", value.x, value.y)
            } else {
                format!("{name}\n{:.1}, {:.1}", value.x, value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for p in &spec.points {
                let color = if decorated.contains(&p.row) {
                    Color32::TRANSPARENT
                } else {
                    state
                        .color_map
                        .as_ref()
                        .map(|cm| cm.color_for(&p.division))
                        .unwrap_or(Color32::LIGHT_BLUE)
                };
                plot_ui.points(
                    Points::new(vec![[p.x, p.y]])
                        .name(&p.label)
                        .color(color)
                        .radius(6.0),
                );
            }

            if let Some(line) = &spec.y_median {
                plot_ui.hline(
                    HLine::new(line.value)
                        .name(&line.label)
                        .color(Color32::RED)
                        .style(LineStyle::dashed_loose()),
                );
            }
            if let Some(line) = &spec.x_median {
                plot_ui.vline(
                    VLine::new(line.value)
                        .name(&line.label)
                        .color(Color32::BLUE)
                        .style(LineStyle::dashed_loose()),
                );
            }

            for deco in &spec.decorations {
                match ctx.try_load_texture(&deco.uri, Default::default(), SizeHint::default()) {
                    Ok(TexturePoll::Ready { texture }) => {
                        plot_ui.image(PlotImage::new(
                            texture.id,
                            PlotPoint::new(deco.center[0], deco.center[1]),
                            egui::vec2(deco.size[0] as f32, deco.size[1] as f32),
                        ));
                    }
                    Ok(TexturePoll::Pending { .. }) => {}
                    Err(e) => log::warn!("Could not load {}: {e}", deco.uri),
                }
            }
        });
}
