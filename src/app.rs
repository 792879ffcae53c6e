use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LimitViewApp {
    pub state: AppState,
}

impl LimitViewApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LimitViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs and chart tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::kpi_strip(ui, &self.state);
            ui.separator();

            // Empty filter result: the notice in the KPI strip is all the
            // user gets; no aggregation-backed chart is rendered.
            if self.state.view.is_none() {
                return;
            }

            ui.horizontal(|ui| {
                for (tab, title) in [
                    (Tab::LimitsByVariable, "LIC vs LSC (1 base)"),
                    (Tab::VariableAverages, "Variable averages"),
                    (Tab::RangeHeatmap, "Range heatmap"),
                ] {
                    if ui
                        .selectable_label(self.state.tab == tab, title)
                        .clicked()
                    {
                        self.state.tab = tab;
                    }
                }
            });
            ui.separator();

            match self.state.tab {
                Tab::LimitsByVariable => charts::limits_by_variable(ui, &self.state),
                Tab::VariableAverages => charts::variable_averages(ui, &self.state),
                Tab::RangeHeatmap => charts::range_heatmap(ui, &self.state),
            }
        });
    }
}
