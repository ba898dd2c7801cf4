use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, TextEdit, Ui};

use crate::data::aggregate::SummaryStats;
use crate::state::AppState;
use crate::ui::{charts, map, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Volcano Explorer Controls");
    ui.separator();

    // The dataset is immutable; holding our own handle lets the loops below
    // call the mutating setters on `state`.
    let dataset = Arc::clone(&state.dataset);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Country ----
            ui.strong("Select Country");
            let current = state.criteria.country.clone();
            egui::ComboBox::from_id_salt("country")
                .selected_text(&current)
                .width(ui.available_width() - 8.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for country in &dataset.countries {
                        if ui.selectable_label(current == *country, country).clicked() {
                            state.set_country(country);
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Elevation range ----
            ui.strong("Elevation Range (m)");
            let (min, max) = state.elevation_limits();
            let (mut lo, mut hi) = state.criteria.elevation_range;
            let lo_changed = ui
                .add(Slider::new(&mut lo, min..=max).step_by(1.0).text("from"))
                .changed();
            let hi_changed = ui
                .add(Slider::new(&mut hi, min..=max).step_by(1.0).text("to"))
                .changed();
            if lo_changed || hi_changed {
                state.set_elevation_range(lo, hi);
            }
            ui.add_space(8.0);

            // ---- Name search ----
            ui.strong("Search by Volcano Name");
            let mut query = state.criteria.name_query.clone();
            if ui
                .add(TextEdit::singleline(&mut query).hint_text("e.g. Fuji"))
                .changed()
            {
                state.set_name_query(&query);
            }
            ui.add_space(8.0);
            ui.separator();

            // ---- Volcano types (multi-select) ----
            let header_text = format!(
                "Volcano Type(s)  ({}/{})",
                state.criteria.types.len(),
                dataset.primary_types.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("types")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_types();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_types();
                        }
                    });

                    for primary_type in &dataset.primary_types {
                        let mut checked = state.criteria.types.contains(primary_type);
                        if ui.checkbox(&mut checked, primary_type).changed() {
                            state.toggle_type(primary_type);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Download Filtered Data…").clicked() {
                state.export_csv();
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} volcanoes loaded, {} shown",
            state.dataset.len(),
            state.snapshot.view.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – summary, charts, map, table
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Interactive Volcano Explorer");
            ui.label("Explore volcanoes around the world with filters, maps, and charts.");
            ui.add_space(8.0);

            ui.heading(format!("Summary for {}", state.criteria.country));
            for line in summary_lines(&state.snapshot.stats) {
                ui.label(line);
            }
            let query = &state.criteria.name_query;
            if !query.is_empty() {
                ui.label(
                    RichText::new(format!(
                        "{} of {} volcanoes match \"{query}\"",
                        state.snapshot.view.len(),
                        state.snapshot.baseline.len()
                    ))
                    .italics(),
                );
            }

            let snapshot = &state.snapshot;
            if snapshot.has_charts() {
                ui.add_space(12.0);
                ui.heading("Top 10 Tallest Volcanoes");
                charts::elevation_bars(ui, &snapshot.top_bars);

                ui.add_space(12.0);
                ui.heading("Volcano Type Distribution");
                charts::type_pie(ui, &snapshot.pie);

                ui.add_space(12.0);
                ui.heading("Volcano Map");
                map::volcano_map(ui, &snapshot.map);
            }

            ui.add_space(12.0);
            ui.heading("Filtered Volcano Data");
            table::data_table(ui, &snapshot.table);

            ui.add_space(8.0);
            if ui.button("Download Filtered Data").clicked() {
                state.export_csv();
            }
        });
}

/// Text of the summary block. Elevation lines say "no data" for an empty view.
pub fn summary_lines(stats: &SummaryStats) -> Vec<String> {
    let (average, max) = match stats.elevation {
        Some(e) => (format!("{:.2} m", e.average), format!("{:.2} m", e.max)),
        None => ("no data".to_string(), "no data".to_string()),
    };
    vec![
        format!("• Number of Volcanoes: {}", stats.count),
        format!("• Average Elevation: {average}"),
        format!("• Highest Elevation: {max}"),
    ]
}
