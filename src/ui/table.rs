use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

/// Render a striped preview grid with a leading row-number column.
pub fn preview_table(ui: &mut Ui, headers: &[String], rows: &[Vec<String>]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .column(Column::auto().at_least(32.0))
        .columns(Column::auto().at_least(60.0), headers.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in headers {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (i, row) in rows.iter().enumerate() {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(i.to_string());
                    });
                    for cell in row {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}
