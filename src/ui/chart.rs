//! # Cumulative Accuracy Chart
//!
//! This module renders the central chart showing:
//! - The cumulative accuracy series as a solid line over sample index
//! - A dashed horizontal reference line at the final accuracy
//! - Axes with tick labels, axis titles, a chart title and a legend
//!
//! ## Coordinate Mapping
//!
//! Sample indices `0..=n-1` map linearly onto the plot width and accuracy values
//! `0.0..=1.0` onto the plot height (inverted, so 1.0 is at the top), both via
//! `egui::lerp`. The mapping and tick generation are plain functions over
//! `egui::Rect`, so they are tested without a window.
//!
//! ## Decimation
//!
//! Logs can hold far more samples than there are pixels. The series is thinned
//! to at most two points per horizontal pixel, always keeping the final sample
//! so the line ends exactly on the reference value.

use crate::ui::AppState;
use eframe::egui;
use egui::Color32;

pub const CHART_TITLE: &str = "Accuracy Over Time";
pub const X_AXIS_LABEL: &str = "Time (samples)";
pub const Y_AXIS_LABEL: &str = "Accuracy";
pub const SERIES_LABEL: &str = "Cumulative Accuracy";

const MARGIN_LEFT: f32 = 70.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 44.0;
const MARGIN_BOTTOM: f32 = 56.0;

/// Target number of x-axis tick intervals.
const X_TICK_TARGET: f64 = 8.0;

const SERIES_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
const REFERENCE_COLOR: Color32 = Color32::from_rgb(214, 39, 40);

/// Maps sample index and accuracy value into a screen-space plot rectangle.
#[derive(Debug, Clone, Copy)]
pub struct ChartFrame {
    pub plot: egui::Rect,
    /// Largest sample index shown on the x-axis (at least 1).
    pub x_max: f64,
}

impl ChartFrame {
    pub fn new(plot: egui::Rect, row_count: usize) -> Self {
        Self {
            plot,
            x_max: row_count.saturating_sub(1).max(1) as f64,
        }
    }

    /// Screen position of sample `x` with accuracy `y`.
    pub fn to_screen(&self, x: f64, y: f64) -> egui::Pos2 {
        let tx = (x / self.x_max).clamp(0.0, 1.0) as f32;
        let ty = y.clamp(0.0, 1.0) as f32;
        egui::pos2(
            egui::lerp(self.plot.left()..=self.plot.right(), tx),
            egui::lerp(self.plot.bottom()..=self.plot.top(), ty),
        )
    }
}

/// Plot area inside `outer` after reserving room for title, ticks and labels.
pub fn plot_area(outer: egui::Rect) -> egui::Rect {
    let min = egui::pos2(outer.left() + MARGIN_LEFT, outer.top() + MARGIN_TOP);
    let max = egui::pos2(
        (outer.right() - MARGIN_RIGHT).max(min.x + 1.0),
        (outer.bottom() - MARGIN_BOTTOM).max(min.y + 1.0),
    );
    egui::Rect::from_min_max(min, max)
}

/// Accuracy ticks from 0.0 to 1.0 in steps of 0.2.
pub fn y_ticks() -> Vec<f64> {
    (0..=5).map(|i| i as f64 * 0.2).collect()
}

/// Sample-index ticks at a 1/2/5 x 10^k step, starting at zero and not exceeding `x_max`.
pub fn x_ticks(x_max: f64) -> Vec<f64> {
    if x_max <= 0.0 {
        return vec![0.0];
    }

    let raw_step = (x_max / X_TICK_TARGET).max(1.0);
    let magnitude = 10f64.powi(raw_step.log10().floor() as i32);
    let normalized = raw_step / magnitude;
    let multiplier = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = multiplier * magnitude;

    let count = (x_max / step).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

/// Indices of the samples to draw when at most `max_points` fit.
///
/// Keeps the first and last index; intermediate indices are taken at a fixed stride.
pub fn decimated_indices(len: usize, max_points: usize) -> Vec<usize> {
    if len <= max_points || max_points < 2 {
        return (0..len).collect();
    }

    let stride = len.div_ceil(max_points - 1);
    let mut indices: Vec<usize> = (0..len).step_by(stride).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

/// Render the central chart panel.
///
/// # Parameters
///
/// * `ctx` - egui context for rendering
/// * `state` - Application state holding the report
pub fn render(ctx: &egui::Context, state: &AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();

        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        let frame = ChartFrame::new(plot_area(rect), state.report.row_count());

        draw_title(&painter, rect, frame, text_color);
        draw_axes(&painter, frame, text_color);
        draw_series(&painter, frame, &state.report.cumulative);
        draw_reference_line(&painter, frame, state.report.final_fraction);
        draw_legend(&painter, frame, &state.report.final_accuracy_label(), text_color);
    });
}

fn draw_title(painter: &egui::Painter, rect: egui::Rect, frame: ChartFrame, color: Color32) {
    painter.text(
        egui::pos2(frame.plot.center().x, rect.top() + MARGIN_TOP / 2.0),
        egui::Align2::CENTER_CENTER,
        CHART_TITLE,
        egui::FontId::proportional(18.0),
        color,
    );

    painter.text(
        egui::pos2(frame.plot.center().x, rect.bottom() - 12.0),
        egui::Align2::CENTER_BOTTOM,
        X_AXIS_LABEL,
        egui::FontId::proportional(14.0),
        color,
    );

    // Y-axis title reads bottom-to-top; rotation pivots on the galley's top-left corner
    let galley = painter.layout_no_wrap(Y_AXIS_LABEL.to_string(), egui::FontId::proportional(14.0), color);
    let pos = egui::pos2(rect.left() + 10.0, frame.plot.center().y + galley.size().x / 2.0);
    painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(-std::f32::consts::FRAC_PI_2));
}

/// Draw the plot frame, grid lines and tick labels.
fn draw_axes(painter: &egui::Painter, frame: ChartFrame, color: Color32) {
    let plot = frame.plot;
    let grid_stroke = egui::Stroke::new(1.0, color.gamma_multiply(0.15));
    let axis_stroke = egui::Stroke::new(1.0, color);
    let tick_font = egui::FontId::proportional(12.0);

    for y in y_ticks() {
        let p = frame.to_screen(0.0, y);
        painter.line_segment([egui::pos2(plot.left(), p.y), egui::pos2(plot.right(), p.y)], grid_stroke);
        painter.line_segment([egui::pos2(plot.left() - 5.0, p.y), egui::pos2(plot.left(), p.y)], axis_stroke);
        painter.text(
            egui::pos2(plot.left() - 8.0, p.y),
            egui::Align2::RIGHT_CENTER,
            format!("{:.1}", y),
            tick_font.clone(),
            color,
        );
    }

    for x in x_ticks(frame.x_max) {
        let p = frame.to_screen(x, 0.0);
        painter.line_segment([egui::pos2(p.x, plot.top()), egui::pos2(p.x, plot.bottom())], grid_stroke);
        painter.line_segment([egui::pos2(p.x, plot.bottom()), egui::pos2(p.x, plot.bottom() + 5.0)], axis_stroke);
        painter.text(
            egui::pos2(p.x, plot.bottom() + 8.0),
            egui::Align2::CENTER_TOP,
            format!("{}", x as u64),
            tick_font.clone(),
            color,
        );
    }

    painter.rect_stroke(plot, 0.0, axis_stroke, egui::StrokeKind::Inside);
}

fn draw_series(painter: &egui::Painter, frame: ChartFrame, cumulative: &[f64]) {
    let max_points = (frame.plot.width() * 2.0).max(2.0) as usize;
    let points: Vec<egui::Pos2> = decimated_indices(cumulative.len(), max_points)
        .into_iter()
        .map(|i| frame.to_screen(i as f64, cumulative[i]))
        .collect();

    match points.len() {
        0 => {}
        1 => {
            painter.circle_filled(points[0], 3.0, SERIES_COLOR);
        }
        _ => {
            painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, SERIES_COLOR)));
        }
    }
}

fn draw_reference_line(painter: &egui::Painter, frame: ChartFrame, final_fraction: f64) {
    let y = frame.to_screen(0.0, final_fraction).y;
    let line = [egui::pos2(frame.plot.left(), y), egui::pos2(frame.plot.right(), y)];
    painter.extend(egui::Shape::dashed_line(&line, egui::Stroke::new(1.5, REFERENCE_COLOR), 8.0, 5.0));
}

/// Draw the legend box in the lower-right corner of the plot.
fn draw_legend(painter: &egui::Painter, frame: ChartFrame, final_label: &str, text_color: Color32) {
    let font = egui::FontId::proportional(13.0);
    let row_height = 20.0;
    let swatch_width = 28.0;
    let padding = 8.0;

    let entries = [SERIES_LABEL, final_label];
    let text_width = entries
        .iter()
        .map(|label| painter.layout_no_wrap(label.to_string(), font.clone(), text_color).size().x)
        .fold(0.0_f32, f32::max);

    let size = egui::vec2(padding * 3.0 + swatch_width + text_width, padding * 2.0 + row_height * entries.len() as f32);
    let legend = egui::Rect::from_min_size(frame.plot.right_bottom() - size - egui::vec2(10.0, 10.0), size);

    painter.rect_filled(legend, 4.0, Color32::from_black_alpha(160));
    painter.rect_stroke(legend, 4.0, egui::Stroke::new(1.0, text_color.gamma_multiply(0.4)), egui::StrokeKind::Inside);

    for (row, label) in entries.iter().enumerate() {
        let y = legend.top() + padding + row_height * (row as f32 + 0.5);
        let x0 = legend.left() + padding;
        let swatch = [egui::pos2(x0, y), egui::pos2(x0 + swatch_width, y)];
        if row == 0 {
            painter.line_segment(swatch, egui::Stroke::new(2.0, SERIES_COLOR));
        } else {
            painter.extend(egui::Shape::dashed_line(&swatch, egui::Stroke::new(1.5, REFERENCE_COLOR), 6.0, 4.0));
        }
        painter.text(
            egui::pos2(x0 + swatch_width + padding, y),
            egui::Align2::LEFT_CENTER,
            *label,
            font.clone(),
            text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(row_count: usize) -> ChartFrame {
        let plot = egui::Rect::from_min_max(egui::pos2(100.0, 50.0), egui::pos2(500.0, 250.0));
        ChartFrame::new(plot, row_count)
    }

    #[test]
    fn corners_map_to_plot_edges() {
        let f = frame(101);
        assert_eq!(f.to_screen(0.0, 0.0), egui::pos2(100.0, 250.0));
        assert_eq!(f.to_screen(100.0, 1.0), egui::pos2(500.0, 50.0));
        assert_eq!(f.to_screen(50.0, 0.5), egui::pos2(300.0, 150.0));
    }

    #[test]
    fn values_outside_range_are_clamped() {
        let f = frame(11);
        assert_eq!(f.to_screen(20.0, 1.5), egui::pos2(500.0, 50.0));
    }

    #[test]
    fn single_sample_does_not_divide_by_zero() {
        let f = frame(1);
        assert_eq!(f.x_max, 1.0);
        assert!(f.to_screen(0.0, 1.0).x.is_finite());
    }

    #[test]
    fn y_ticks_span_unit_interval() {
        let ticks = y_ticks();
        assert_eq!(ticks.len(), 6);
        assert_eq!(ticks[0], 0.0);
        assert!((ticks[5] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn x_ticks_use_round_steps() {
        assert_eq!(x_ticks(5.0), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(x_ticks(100.0), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let ticks = x_ticks(9_999.0);
        assert_eq!(ticks[1], 2000.0);
        assert!(*ticks.last().unwrap() <= 9_999.0);
    }

    #[test]
    fn decimation_keeps_small_series() {
        assert_eq!(decimated_indices(4, 10), vec![0, 1, 2, 3]);
        assert!(decimated_indices(0, 10).is_empty());
    }

    #[test]
    fn decimation_keeps_endpoints() {
        let indices = decimated_indices(10_000, 500);
        assert!(indices.len() <= 500);
        assert_eq!(indices[0], 0);
        assert_eq!(*indices.last().unwrap(), 9_999);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}
