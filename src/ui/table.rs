use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::present::{TableRow, TABLE_HEADERS};

const ROW_HEIGHT: f32 = 20.0;

/// Filtered records, restricted to the display columns.
pub fn data_table(ui: &mut Ui, rows: &[TableRow]) {
    if rows.is_empty() {
        ui.label("No volcanoes match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        // the central panel already scrolls
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder().at_least(120.0))
        .header(ROW_HEIGHT, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(&r.name);
                });
                row.col(|ui| {
                    ui.label(&r.country);
                });
                row.col(|ui| {
                    ui.label(&r.primary_type);
                });
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("{:.0}", r.elevation));
                    });
                });
                row.col(|ui| {
                    ui.label(&r.activity_evidence);
                });
            });
        });
}
