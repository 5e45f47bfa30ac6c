use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::generate_ramp;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Visual insights (charts tab)
// ---------------------------------------------------------------------------

/// Render the cuisine and borough charts.
pub fn insights(ui: &mut Ui, state: &AppState) {
    ui.heading("🍽 Top Cuisine Types by Inspection Count");
    let ramp = generate_ramp(state.cuisine_counts.len());
    let cuisine_colors: Vec<Color32> = ramp.into_iter().rev().collect();
    count_chart(ui, "cuisine_chart", &state.cuisine_counts, |i, _| {
        cuisine_colors.get(i).copied().unwrap_or(Color32::LIGHT_BLUE)
    });

    ui.add_space(12.0);

    ui.heading("🗺 Inspections by Borough");
    count_chart(ui, "borough_chart", &state.borough_counts, |_, borough| {
        state
            .borough_colors
            .as_ref()
            .map(|cm| cm.color_for(borough))
            .unwrap_or(Color32::LIGHT_BLUE)
    });
}

/// One vertical bar per `(category, count)`, labelled along the x axis.
fn count_chart(
    ui: &mut Ui,
    id: &str,
    counts: &[(String, usize)],
    color: impl Fn(usize, &str) -> Color32,
) {
    if counts.is_empty() {
        ui.label("No data to chart.");
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (category, n))| {
            Bar::new(i as f64, *n as f64)
                .name(category)
                .fill(color(i, category))
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|(c, _)| c.clone()).collect();

    Plot::new(id)
        .height(320.0)
        .y_axis_label("Number of inspections")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7));
        });
}
