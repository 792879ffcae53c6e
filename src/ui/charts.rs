use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Polygon};

use crate::color::{LIC_COLOR, LIC_LINE_COLOR, LSC_COLOR, SequentialScale};
use crate::data::reshape::{LimitKind, single_base_long};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tab 1: LIC vs LSC per variable, for exactly one base
// ---------------------------------------------------------------------------

/// Grouped bar chart of the raw LIC/LSC values per variable.  Only defined
/// for a single selected base; otherwise a guidance message is shown.
pub fn limits_by_variable(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.label(RichText::new("LIC and LSC per variable for one base").strong());

    let Some(long) = single_base_long(dataset, &state.visible_indices, &state.selection) else {
        ui.add_space(8.0);
        ui.label("To view this chart, select exactly one Base/FVT in the sidebar.");
        return;
    };

    ui.label(format!("Selected base: {}", long.base));

    // Distinct variables in ascending order define the x positions.
    let variables: Vec<String> = long
        .records
        .iter()
        .map(|r| r.variable.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    let position = |variable: &str| {
        variables
            .iter()
            .position(|v| v == variable)
            .unwrap_or(0) as f64
    };

    let mut lic_bars = Vec::new();
    let mut lsc_bars = Vec::new();
    for rec in &long.records {
        let x = position(&rec.variable);
        match rec.kind {
            LimitKind::Lic => lic_bars.push(Bar::new(x - 0.18, rec.value).width(0.32)),
            LimitKind::Lsc => lsc_bars.push(Bar::new(x + 0.18, rec.value).width(0.32)),
        }
    }

    let names = variables.clone();
    Plot::new("limits_by_variable")
        .legend(Legend::default())
        .x_axis_label("Variable (part)")
        .y_axis_label("Limit value")
        .x_axis_formatter(move |mark, _range| category_label(mark.value, &names))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(lic_bars)
                    .name(LimitKind::Lic.to_string())
                    .color(LIC_COLOR),
            );
            plot_ui.bar_chart(
                BarChart::new(lsc_bars)
                    .name(LimitKind::Lsc.to_string())
                    .color(LSC_COLOR),
            );
        });
}

// ---------------------------------------------------------------------------
// Tab 2: per-variable averages
// ---------------------------------------------------------------------------

/// Line comparison of mean LSC vs mean LIC per variable, two single-metric
/// bar charts, and the filtered rows as a table.
pub fn variable_averages(ui: &mut Ui, state: &AppState) {
    eframe::egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            variable_averages_body(ui, state);
        });
}

fn variable_averages_body(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let means = &view.per_variable;
    let variables: Vec<String> = means.iter().map(|m| m.variable.clone()).collect();

    ui.label(RichText::new("Mean LSC vs LIC per variable (all filtered bases)").strong());

    let lsc_points: PlotPoints = means
        .iter()
        .enumerate()
        .map(|(i, m)| [i as f64, m.mean_lsc])
        .collect();
    let lic_points: PlotPoints = means
        .iter()
        .enumerate()
        .map(|(i, m)| [i as f64, m.mean_lic])
        .collect();

    let names = variables.clone();
    Plot::new("variable_means_lines")
        .legend(Legend::default())
        .x_axis_label("Variable (part)")
        .y_axis_label("Value")
        .height(320.0)
        .x_axis_formatter(move |mark, _range| category_label(mark.value, &names))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(lsc_points)
                    .name("LSC (mean)")
                    .color(LSC_COLOR)
                    .width(1.5),
            );
            plot_ui.line(
                Line::new(lic_points)
                    .name("LIC (mean)")
                    .color(LIC_LINE_COLOR)
                    .width(1.5),
            );
        });

    ui.add_space(8.0);
    ui.label(RichText::new("Mean limits per variable").strong());

    ui.columns(2, |cols| {
        mean_bar_chart(
            &mut cols[0],
            "mean_lic_bars",
            "LIC (mean)",
            LIC_COLOR,
            &variables,
            means.iter().map(|m| m.mean_lic),
        );
        mean_bar_chart(
            &mut cols[1],
            "mean_lsc_bars",
            "LSC (mean)",
            LSC_COLOR,
            &variables,
            means.iter().map(|m| m.mean_lsc),
        );
    });

    ui.add_space(8.0);
    ui.label(RichText::new("Filtered rows").strong());
    filtered_rows_table(ui, state);
}

/// Single-series bar chart of one mean metric per variable.
fn mean_bar_chart(
    ui: &mut Ui,
    id: &str,
    name: &str,
    color: Color32,
    variables: &[String],
    values: impl Iterator<Item = f64>,
) {
    let bars: Vec<Bar> = values
        .enumerate()
        .map(|(i, v)| Bar::new(i as f64, v).width(0.6))
        .collect();

    let names = variables.to_vec();
    Plot::new(id.to_string())
        .legend(Legend::default())
        .x_axis_label("Variable (part)")
        .y_axis_label(name.to_string())
        .height(220.0)
        .x_axis_formatter(move |mark, _range| category_label(mark.value, &names))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
        });
}

/// The filtered rows with the derived range/center columns.
fn filtered_rows_table(ui: &mut Ui, state: &AppState) {
    use egui_extras::{Column, TableBuilder};

    let Some(dataset) = &state.dataset else {
        return;
    };
    let indices = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(60.0), 4)
        .header(20.0, |mut header| {
            for title in ["Base", "Variable", "LIC", "LSC", "Range", "Center"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &dataset.records[indices[row.index()]];
                row.col(|ui| {
                    ui.label(&rec.base);
                });
                row.col(|ui| {
                    ui.label(&rec.variable);
                });
                for value in [rec.lic, rec.lsc, rec.range(), rec.center()] {
                    row.col(|ui| {
                        ui.label(format!("{value:.2}"));
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Tab 3: range heatmap, base × variable
// ---------------------------------------------------------------------------

/// Heatmap of the mean range (LSC − LIC) per base × variable.  Cells with no
/// matching rows are left blank, not drawn as zero.
pub fn range_heatmap(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let heatmap = &view.heatmap;

    ui.label(RichText::new("Mean range (LSC − LIC) per Base/FVT and variable").strong());

    let Some((min, max)) = heatmap.value_bounds() else {
        return;
    };
    let scale = SequentialScale::new(min, max);

    let variable_names = heatmap.variables.clone();
    let base_names = heatmap.bases.clone();
    Plot::new("range_heatmap")
        .x_axis_label("Variable (part)")
        .y_axis_label("Base / FVT")
        .x_axis_formatter(move |mark, _range| category_label(mark.value, &variable_names))
        .y_axis_formatter(move |mark, _range| category_label(mark.value, &base_names))
        .show_grid(false)
        .show(ui, |plot_ui| {
            for (bi, _) in heatmap.bases.iter().enumerate() {
                for (vi, _) in heatmap.variables.iter().enumerate() {
                    let Some(value) = heatmap.cell(bi, vi) else {
                        continue;
                    };
                    let (x, y) = (vi as f64, bi as f64);
                    let corners = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(corners))
                            .fill_color(scale.color_for(value))
                            .stroke(Stroke::new(1.0, Color32::from_gray(60))),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Categorical axis labels
// ---------------------------------------------------------------------------

/// Label integer axis positions with their category name; fractional grid
/// marks stay unlabeled.
fn category_label(value: f64, names: &[String]) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}
