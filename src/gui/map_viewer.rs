//! Map Viewer Widget
//! Central panel showing the current query outcome. Rendered maps are
//! drawn with egui_plot (longitude on x, latitude on y) on a fixed-size
//! surface inside a scroll area.

use crate::data::QueryOutcome;
use crate::map::{animation_phase, ant_positions, MapDocument, MarkerColor, PathStyle};
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

/// Width in pixels of one map tile at zoom level 0.
const TILE_SIZE: f64 = 256.0;
const MARKER_RADIUS: f32 = 7.0;

/// Plot colour for a marker colour.
pub fn marker_color32(color: MarkerColor) -> Color32 {
    match color {
        MarkerColor::Red => Color32::from_rgb(214, 62, 42),
        MarkerColor::Green => Color32::from_rgb(114, 176, 38),
        MarkerColor::Blue => Color32::from_rgb(56, 170, 221),
        MarkerColor::Gray => Color32::from_rgb(87, 87, 87),
    }
}

/// Plot colour for a path style.
pub fn path_color32(style: &PathStyle) -> Color32 {
    let alpha = (style.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(128, 0, 128, alpha)
}

/// Degrees covered by `pixels` at the given zoom level.
pub fn degrees_for_pixels(pixels: u32, zoom: u8) -> f64 {
    pixels as f64 / TILE_SIZE * 360.0 / 2f64.powi(zoom as i32)
}

/// Initial view around the document center, as `([min_lon, min_lat], [max_lon, max_lat])`.
pub fn initial_bounds(map: &MapDocument) -> ([f64; 2], [f64; 2]) {
    let half_w = degrees_for_pixels(map.width, map.zoom) / 2.0;
    let half_h = degrees_for_pixels(map.height, map.zoom) / 2.0;
    (
        [map.center.lon - half_w, map.center.lat - half_h],
        [map.center.lon + half_w, map.center.lat + half_h],
    )
}

/// Central display area for the current outcome.
#[derive(Default)]
pub struct MapViewer {
    reset_view: bool,
}

impl MapViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-center the next rendered frame on the document's initial view.
    pub fn reset_view(&mut self) {
        self.reset_view = true;
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, outcome: &QueryOutcome) {
        match outcome {
            QueryOutcome::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Enter a company name to begin")
                            .size(20.0)
                            .color(Color32::GRAY),
                    );
                });
            }
            QueryOutcome::Warned { message, .. } => {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(2.0, Color32::from_rgb(243, 156, 18)))
                    .fill(Color32::from_rgb(255, 243, 205))
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("⚠ {}", message))
                                .size(16.0)
                                .color(Color32::from_rgb(133, 100, 4)),
                        );
                    });
            }
            QueryOutcome::Rendered { key, map } => {
                ui.label(RichText::new(format!("Tracking: {}", key)).size(18.0).strong());
                ui.add_space(8.0);

                ScrollArea::both()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.draw_map(ui, map));

                if !map.paths.is_empty() {
                    ctx.request_repaint();
                }
            }
        }
    }

    fn draw_map(&mut self, ui: &mut egui::Ui, map: &MapDocument) {
        let time = ui.input(|i| i.time);
        let reset = std::mem::take(&mut self.reset_view);

        Plot::new("geomap")
            .width(map.width as f32)
            .height(map.height as f32)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .legend(Legend::default())
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("lat {:.4}, lon {:.4}", value.y, value.x)
                } else {
                    format!("{}\nlat {:.4}, lon {:.4}", name, value.y, value.x)
                }
            })
            .show(ui, |plot_ui| {
                if reset {
                    let (min, max) = initial_bounds(map);
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
                }

                for path in &map.paths {
                    let color = path_color32(&path.style);
                    let points: PlotPoints =
                        path.locations.iter().map(|c| c.plot_xy()).collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(color)
                            .width(path.style.weight as f32)
                            .style(LineStyle::Dashed {
                                length: path.style.dash_array[0] as f32,
                            }),
                    );

                    let phase = animation_phase(time, path.style.delay);
                    let ants: PlotPoints = ant_positions(&path.locations, phase)
                        .iter()
                        .map(|c| c.plot_xy())
                        .collect();
                    plot_ui.points(
                        Points::new(ants)
                            .radius(path.style.weight as f32)
                            .color(Color32::WHITE),
                    );
                }

                // One series per tier label so the legend reads Tier1/Tier2/Tier3.
                let mut series: Vec<(&str, MarkerColor, Vec<[f64; 2]>)> = Vec::new();
                for marker in &map.markers {
                    match series.iter_mut().find(|(name, _, _)| *name == marker.tooltip) {
                        Some((_, _, points)) => points.push(marker.location.plot_xy()),
                        None => series.push((
                            marker.tooltip.as_str(),
                            marker.color,
                            vec![marker.location.plot_xy()],
                        )),
                    }
                }
                for (name, color, points) in series {
                    plot_ui.points(
                        Points::new(points.into_iter().collect::<PlotPoints>())
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(MARKER_RADIUS)
                            .color(marker_color32(color))
                            .name(name),
                    );
                }
            });
    }
}
