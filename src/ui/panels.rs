use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use dataset_viewer::{Action, MissingStrategy};

use crate::state::{AppState, Section, Status};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();
    ui.label("Select Section");
    for section in Section::ALL {
        ui.radio_value(&mut state.section, section, section.label());
    }
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
        });

        ui.separator();

        if let Some(summary) = &state.summary {
            ui.label(format!("{} rows × {} columns", summary.rows, summary.column_count()));
            ui.separator();
        }

        match &state.status {
            Some(Status::Success(msg)) => {
                ui.label(RichText::new(msg).color(Color32::from_rgb(0x2e, 0xa0, 0x43)));
            }
            Some(Status::Warning(msg)) => {
                ui.label(RichText::new(msg).color(Color32::YELLOW));
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – one section at a time
// ---------------------------------------------------------------------------

/// Render the section picked in the navigation panel.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Interactive Data Exploration and Cleaning");
    ui.separator();

    if state.section != Section::Upload && !state.session.is_loaded() {
        ui.label(RichText::new("Please upload a dataset first!").color(Color32::YELLOW));
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.section {
            Section::Upload => upload_section(ui, state),
            Section::Overview => overview_section(ui, state),
            Section::Cleaning => cleaning_section(ui, state),
            Section::Visualizations => plot::visualizations(ui, state),
        });
}

fn upload_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Upload Your Dataset");
    if ui.button("Upload a CSV file…").clicked() {
        open_file_dialog(state);
    }
    if state.session.is_loaded() {
        ui.add_space(8.0);
        ui.label("Preview of the Dataset:");
        preview(ui, state);
    }
}

fn overview_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Overview");
    let Some(summary) = &state.summary else {
        return;
    };

    ui.label(format!("Shape of the dataset: ({}, {})", summary.rows, summary.column_count()));
    ui.add_space(4.0);
    ui.strong("Column Names:");
    ui.label(format!("{:?}", summary.column_names()));
    ui.add_space(4.0);

    egui::Grid::new("overview_grid")
        .striped(true)
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Column");
            ui.strong("Data Type");
            ui.strong("Missing Values");
            ui.end_row();
            for col in &summary.columns {
                ui.label(&col.name);
                ui.label(col.dtype.dtype_name());
                ui.label(col.missing.to_string());
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.label("Preview of the Dataset:");
    preview(ui, state);
}

fn cleaning_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Cleaning");

    if ui.button("Remove Duplicates").clicked() {
        state.apply(Action::RemoveDuplicates);
    }
    ui.separator();

    ui.checkbox(&mut state.handle_missing_open, "Handle Missing Values");
    if state.handle_missing_open {
        ui.horizontal(|ui: &mut Ui| {
            egui::ComboBox::from_id_salt("missing_method")
                .selected_text(state.missing_strategy.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for strategy in MissingStrategy::ALL {
                        ui.selectable_value(&mut state.missing_strategy, strategy, strategy.label());
                    }
                });
            if ui.button("Apply").clicked() {
                state.apply(Action::HandleMissing(state.missing_strategy));
            }
        });
    }
    ui.separator();

    ui.checkbox(&mut state.drop_columns_open, "Drop Columns");
    if state.drop_columns_open {
        let columns = state
            .session
            .table()
            .map(|t| t.column_names())
            .unwrap_or_default();
        ui.label("Select Columns to Drop");
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for col in &columns {
                let mut checked = state.drop_selection.contains(col);
                if ui.checkbox(&mut checked, col).changed() {
                    if checked {
                        state.drop_selection.insert(col.clone());
                    } else {
                        state.drop_selection.remove(col);
                    }
                }
            }
        });
        let can_drop = !state.drop_selection.is_empty();
        if ui
            .add_enabled(can_drop, egui::Button::new("Drop Selected Columns"))
            .clicked()
        {
            let names = state.drop_selection.iter().cloned().collect();
            state.apply(Action::DropColumns(names));
        }
    }
    ui.separator();

    ui.label("Preview of the Cleaned Dataset:");
    preview(ui, state);
}

fn preview(ui: &mut Ui, state: &AppState) {
    let headers = state
        .summary
        .as_ref()
        .map(|s| s.columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>())
        .unwrap_or_default();
    ui.push_id("preview", |ui: &mut Ui| {
        table::preview_table(ui, &headers, &state.preview);
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
