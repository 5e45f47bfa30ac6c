use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::CRITICAL_RED;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InspectionExplorerApp {
    pub state: AppState,
}

impl InspectionExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for InspectionExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if let Some(err) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(format!("Could not load inspection data.\n\n{err}"))
                            .color(CRITICAL_RED)
                            .heading(),
                    );
                });
            });
            return;
        }

        // ---- Left side panel: legend ----
        egui::SidePanel::left("legend_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            tabs::tab_bar(ui, &mut self.state);
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| match self.state.tab {
                    Tab::Overview => tabs::overview(ui),
                    Tab::Search => tabs::search(ui, &mut self.state),
                    Tab::Explore => tabs::explore(ui, &mut self.state),
                    Tab::Insights => plot::insights(ui, &self.state),
                });
        });
    }
}
