use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::ActivityColor;
use crate::data::present::MapLayer;

/// Degrees shown on each side of the centroid when the map first opens.
const INITIAL_HALF_SPAN: f64 = 12.0;

// ---------------------------------------------------------------------------
// Volcano map (longitude / latitude scatter)
// ---------------------------------------------------------------------------

/// Equirectangular point map, one series per activity colour.
pub fn volcano_map(ui: &mut Ui, layer: &MapLayer) {
    // No centre means no points; never centre on NaN.
    let Some(center) = layer.center else {
        ui.label("No volcanoes to map.");
        return;
    };

    Plot::new("volcano_map")
        .height(380.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(center.longitude - INITIAL_HALF_SPAN)
        .include_x(center.longitude + INITIAL_HALF_SPAN)
        .include_y(center.latitude - INITIAL_HALF_SPAN)
        .include_y(center.latitude + INITIAL_HALF_SPAN)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in [ActivityColor::RedHighlight, ActivityColor::BlueDefault] {
                let points: PlotPoints = layer
                    .points
                    .iter()
                    .filter(|p| p.color == category)
                    .map(|p| [p.longitude, p.latitude])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .color(category.color32())
                        .radius(4.0)
                        .name(category.label()),
                );
            }
        });
}
