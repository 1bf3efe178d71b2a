use std::cell::Cell as ClickCell;

use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::view::table::SortDirection;

// ---------------------------------------------------------------------------
// Standings table (left half of the central panel)
// ---------------------------------------------------------------------------

/// Render the title, a sortable page of standings and the pager.
pub fn standings_table(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = state.table.get().as_ref() else {
        ui.label("Pick a season to see the standings.");
        return;
    };

    ui.strong(table.title.as_str());
    ui.add_space(4.0);

    let columns = table.columns.clone();
    let current_sort = table.sort;
    let rows = table.page(state.page, state.page_size).to_vec();
    let clicked_col: ClickCell<Option<usize>> = ClickCell::new(None);

    TableBuilder::new(ui)
        .id_salt("standings")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(60.0), columns.len().saturating_sub(1))
        .header(22.0, |mut header| {
            for (i, name) in columns.iter().enumerate() {
                header.col(|ui| {
                    let arrow = match current_sort {
                        (c, SortDirection::Ascending) if c == i => " ^",
                        (c, SortDirection::Descending) if c == i => " v",
                        _ => "",
                    };
                    if ui.button(format!("{name}{arrow}")).clicked() {
                        clicked_col.set(Some(i));
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let standing = &rows[row.index()];
                for cell in &standing.cells {
                    row.col(|ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });

    ui.horizontal(|ui| {
        let pages = state.page_count();
        if ui.small_button("<").clicked() && state.page > 0 {
            state.set_page(state.page - 1);
        }
        ui.label(format!("Page {} of {pages}", state.page + 1));
        if ui.small_button(">").clicked() {
            state.set_page(state.page + 1);
        }
    });

    if let Some(col) = clicked_col.get() {
        state.sort_table(col);
    }
}
