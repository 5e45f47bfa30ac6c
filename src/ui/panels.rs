use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::{grade_color, CRITICAL_RED};
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – reference legend
// ---------------------------------------------------------------------------

/// Render the grade / score / critical-flag reference shown on every tab.
pub fn side_panel(ui: &mut Ui) {
    ui.heading("🏅 Grade Details");
    ui.separator();
    for (grade, text) in [
        ("A", "0–13 violation points (best)"),
        ("B", "14–27 points"),
        ("C", "28+ points"),
    ] {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(grade).strong().color(grade_color(grade)));
            ui.label(text);
        });
    }
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("P/Z").strong());
        ui.label("Pending / not graded");
    });

    ui.add_space(8.0);
    ui.heading("📊 Score Details");
    ui.separator();
    ui.label("Lower score = better food safety compliance");
    ui.label("0–13 = A grade");

    ui.add_space(8.0);
    ui.heading("🔴 Critical Flag");
    ui.separator();
    ui.label(RichText::new("Critical: major health risk").color(CRITICAL_RED));
    ui.label("Not Critical: minor issues");
    ui.label("Blank: no issue recorded");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open local copy…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!("{} inspection rows loaded", table.len()));
        }

        ui.separator();

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open inspection results")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match inspection_explorer::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!("Loaded {} inspection rows from {}", table.len(), path.display());
                state.set_table(Arc::new(table));
                state.status = Some(Status::Info(format!("Loaded {}", path.display())));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }
}

/// Ask where to save `csv` and write it there. `None` if the user cancelled.
pub fn save_csv_dialog(csv: &[u8], default_name: &str) -> Option<Status> {
    let path = rfd::FileDialog::new()
        .set_title("Download results")
        .set_file_name(default_name)
        .add_filter("CSV", &["csv"])
        .save_file()?;

    Some(match std::fs::write(&path, csv) {
        Ok(()) => {
            log::info!("Wrote {} bytes to {}", csv.len(), path.display());
            Status::Info(format!("Saved {}", path.display()))
        }
        Err(e) => {
            log::error!("Failed to write {}: {e}", path.display());
            Status::Error(format!("Error: {e}"))
        }
    })
}
