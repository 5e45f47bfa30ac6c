use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use inspection_explorer::data::display::{Column as DataColumn, DisplayTable};

use crate::color::CRITICAL_RED;

/// Render a display table with sticky headers and a scrolling body.
pub fn result_table(ui: &mut Ui, id: &str, table: &DisplayTable) {
    let Some((_, leading)) = table.headers.split_last() else {
        return;
    };
    let critical_col = table
        .headers
        .iter()
        .position(|h| h == DataColumn::CriticalFlag.label());

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(360.0)
            .columns(Column::auto().at_least(60.0), leading.len())
            .column(Column::remainder().at_least(200.0))
            .header(22.0, |mut header| {
                for h in &table.headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, table.rows.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for (i, cell) in cells.iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            if Some(i) == critical_col && cell == "Critical" {
                                ui.label(RichText::new(cell).color(CRITICAL_RED));
                            } else {
                                ui.label(cell);
                            }
                        });
                    }
                });
            });
    });
}
