use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::ExtremeEntry;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multiselect per categorical column.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the category sets so we can mutate state inside the loop.
    let bases: Vec<String> = dataset.bases.iter().cloned().collect();
    let variables: Vec<String> = dataset.variables.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            filter_section(ui, state, "Base / FVT", &bases, CategoryAxis::Base);
            filter_section(
                ui,
                state,
                "Variables (parts)",
                &variables,
                CategoryAxis::Variable,
            );
        });
}

/// Which of the two categorical columns a filter section drives.
#[derive(Clone, Copy)]
enum CategoryAxis {
    Base,
    Variable,
}

fn filter_section(
    ui: &mut Ui,
    state: &mut AppState,
    title: &str,
    values: &[String],
    axis: CategoryAxis,
) {
    let n_selected = match axis {
        CategoryAxis::Base => state.selection.bases.len(),
        CategoryAxis::Variable => state.selection.variables.len(),
    };
    let header_text = format!("{title}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    match axis {
                        CategoryAxis::Base => state.select_all_bases(),
                        CategoryAxis::Variable => state.select_all_variables(),
                    }
                }
                if ui.small_button("None").clicked() {
                    match axis {
                        CategoryAxis::Base => state.select_no_bases(),
                        CategoryAxis::Variable => state.select_no_variables(),
                    }
                }
            });

            for value in values {
                let selected = match axis {
                    CategoryAxis::Base => state.selection.bases.contains(value),
                    CategoryAxis::Variable => state.selection.variables.contains(value),
                };
                let mut checked = selected;
                if ui.checkbox(&mut checked, value).changed() {
                    match axis {
                        CategoryAxis::Base => state.toggle_base(value),
                        CategoryAxis::Variable => state.toggle_variable(value),
                    }
                }
            }
        });
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
            if ui.button("Reload").clicked() {
                state.cache.invalidate();
                let path = state.config.data_path.clone();
                state.open_path(&path);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI strip – the four extreme-value metrics
// ---------------------------------------------------------------------------

/// Render the four limit extremes as metric widgets, or the no-data notice
/// when the current filters match nothing.
pub fn kpi_strip(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.label(
            RichText::new("No data for this filter combination. Adjust Base or Variable.")
                .color(ui.visuals().warn_fg_color),
        );
        return;
    };

    let e = &view.extremes;
    ui.columns(4, |cols| {
        metric(&mut cols[0], "LIC maximum", &e.lic_max);
        metric(&mut cols[1], "LIC minimum", &e.lic_min);
        metric(&mut cols[2], "LSC maximum", &e.lsc_max);
        metric(&mut cols[3], "LSC minimum", &e.lsc_min);
    });
}

/// One metric: caption, large value, and the (base – variable) that owns it.
fn metric(ui: &mut Ui, caption: &str, entry: &ExtremeEntry) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(caption).small());
        ui.label(RichText::new(format!("{:.2}", entry.value)).heading());
        ui.label(
            RichText::new(format!("{} – {}", entry.base, entry.variable))
                .small()
                .weak(),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open limits table")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
