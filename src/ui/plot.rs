use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::generate_palette;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Visualizations section
// ---------------------------------------------------------------------------

/// Render the histogram controls and the value-count bar chart.
pub fn visualizations(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Visualizations");

    let mut show_heatmap = false;
    ui.add_enabled(false, egui::Checkbox::new(&mut show_heatmap, "Show Correlation Heatmap"))
        .on_disabled_hover_text("This feature is under development!");

    ui.checkbox(&mut state.show_histogram, "Show Histogram");
    if !state.show_histogram {
        return;
    }

    let columns = state
        .session
        .table()
        .map(|t| t.column_names())
        .unwrap_or_default();
    let current = state.histogram_column.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("histogram_column")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                if ui.selectable_label(current == *col, col).clicked() {
                    state.set_histogram_column(col.clone());
                }
            }
        });

    value_count_chart(ui, state);
}

fn value_count_chart(ui: &mut Ui, state: &AppState) {
    if state.histogram.is_empty() {
        ui.label("No non-missing values in this column.");
        return;
    }

    let colors = generate_palette(state.histogram.len());
    let bars: Vec<Bar> = state
        .histogram
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((value, count), color))| {
            Bar::new(i as f64, *count as f64)
                .name(value.to_string())
                .fill(color)
        })
        .collect();

    let name = state.histogram_column.clone().unwrap_or_default();
    Plot::new("value_counts")
        .x_axis_label(name.clone())
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&name));
        });
}
