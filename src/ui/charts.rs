use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::generate_palette;
use crate::data::present::{BarEntry, PieSlice};

const BAR_COLOR: Color32 = Color32::from_rgb(214, 96, 77);
const PIE_SIZE: f32 = 240.0;

// ---------------------------------------------------------------------------
// Top-N elevation bar chart
// ---------------------------------------------------------------------------

/// Bars in the given order, labelled with the volcano name on the x axis.
pub fn elevation_bars(ui: &mut Ui, bars: &[BarEntry]) {
    let names: Vec<String> = bars.iter().map(|b| b.name.clone()).collect();

    let chart = BarChart::new(
        bars.iter()
            .enumerate()
            .map(|(i, b)| Bar::new(i as f64, b.elevation).name(&b.name).width(0.7))
            .collect(),
    )
    .color(BAR_COLOR)
    .name("Elevation (m)");

    Plot::new("top_elevation")
        .height(280.0)
        .y_axis_label("Elevation (m)")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| bar_label(&names, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Name for an x grid mark; empty between bars.
fn bar_label(names: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Type distribution pie chart
// ---------------------------------------------------------------------------

/// Pie with a colour legend showing each share to one decimal.
pub fn type_pie(ui: &mut Ui, slices: &[PieSlice]) {
    let colors = generate_palette(slices.len());

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(PIE_SIZE), Sense::hover());
        let center = response.rect.center();
        let radius = response.rect.width().min(response.rect.height()) * 0.45;

        // first slice starts at 12 o'clock and slices run counter-clockwise
        let mut start = FRAC_PI_2;
        for (slice, color) in slices.iter().zip(&colors) {
            let sweep = slice.fraction as f32 * TAU;
            painter.extend(wedge(center, radius, start, sweep, *color));
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (slice, color) in slices.iter().zip(&colors) {
                ui.horizontal(|ui: &mut Ui| {
                    ui.colored_label(*color, "■");
                    ui.label(slice.legend_text())
                        .on_hover_text(format!("{} volcanoes", slice.count));
                });
            }
        });
    });
}

/// A pie wedge as a fan of thin triangles, so wedges wider than half the
/// circle still tessellate as convex shapes.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, fill: Color32) -> Vec<Shape> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let steps = ((sweep / TAU) * 128.0).ceil().max(1.0) as usize;
    let point = |angle: f32| center + radius * Vec2::new(angle.cos(), -angle.sin());

    (0..steps)
        .map(|i| {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            Shape::convex_polygon(vec![center, point(a0), point(a1)], fill, Stroke::NONE)
        })
        .collect()
}
